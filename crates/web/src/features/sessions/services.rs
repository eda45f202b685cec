use storage::{
    dto::session::{CreateSessionRequest, UpdateSessionRequest},
    error::{Result, StorageError},
    models::Session,
    repository::{player::PlayerRepository, session::SessionRepository},
    store::DocumentStore,
};

/// Fails with a validation error naming the first unknown player.
async fn require_players(store: &dyn DocumentStore, player_ids: &[String]) -> Result<()> {
    let players = PlayerRepository::new(store);

    for id in player_ids {
        if !players.exists(id).await? {
            return Err(StorageError::validation(format!("Player {} not found", id)));
        }
    }
    Ok(())
}

/// List all sessions, newest first
pub async fn list_sessions(store: &dyn DocumentStore) -> Result<Vec<Session>> {
    SessionRepository::new(store).list().await
}

pub async fn list_player_sessions(store: &dyn DocumentStore, player_id: &str) -> Result<Vec<Session>> {
    PlayerRepository::new(store).find_by_id(player_id).await?;
    SessionRepository::new(store).list_for_player(player_id).await
}

pub async fn get_session(store: &dyn DocumentStore, id: &str) -> Result<Session> {
    SessionRepository::new(store).find_by_id(id).await
}

pub async fn create_session(
    store: &dyn DocumentStore,
    request: &CreateSessionRequest,
) -> Result<Session> {
    require_players(store, &request.player_ids).await?;
    SessionRepository::new(store).create(request).await
}

pub async fn update_session(
    store: &dyn DocumentStore,
    id: &str,
    request: &UpdateSessionRequest,
) -> Result<Session> {
    if let Some(player_ids) = &request.player_ids {
        require_players(store, player_ids).await?;
    }
    SessionRepository::new(store).update(id, request).await
}

pub async fn delete_session(store: &dyn DocumentStore, id: &str) -> Result<()> {
    SessionRepository::new(store).delete(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, seed_player};
    use storage::Database;

    fn request(player_ids: Vec<String>) -> CreateSessionRequest {
        CreateSessionRequest {
            player_ids,
            session_date: date(2026, 10, 2),
            themes: vec!["Tir".into()],
            trainers: vec!["Leo".into()],
            content_details: "Catch and shoot".into(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_unknown_player_is_rejected_before_writing() {
        let db = Database::in_memory();
        let player = seed_player(db.store(), "Lina", "Diallo").await;

        let result = create_session(db.store(), &request(vec![player.id, "ghost".into()])).await;

        assert!(matches!(result, Err(StorageError::Validation(msg)) if msg.contains("ghost")));
        assert!(list_sessions(db.store()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_group_session_is_listed_for_each_player() {
        let db = Database::in_memory();
        let lina = seed_player(db.store(), "Lina", "Diallo").await;
        let hugo = seed_player(db.store(), "Hugo", "Martin").await;

        let session = create_session(db.store(), &request(vec![lina.id.clone(), hugo.id.clone()]))
            .await
            .unwrap();

        for id in [&lina.id, &hugo.id] {
            let sessions = list_player_sessions(db.store(), id).await.unwrap();
            assert_eq!(sessions, vec![session.clone()]);
        }
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_players() {
        let db = Database::in_memory();
        let lina = seed_player(db.store(), "Lina", "Diallo").await;
        let session = create_session(db.store(), &request(vec![lina.id]))
            .await
            .unwrap();

        let result = update_session(
            db.store(),
            &session.id,
            &UpdateSessionRequest {
                player_ids: Some(vec!["ghost".into()]),
                ..UpdateSessionRequest::default()
            },
        )
        .await;

        assert!(matches!(result, Err(StorageError::Validation(_))));
    }
}
