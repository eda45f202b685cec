use storage::{
    dto::player::{CreatePlayerRequest, UpdatePlayerRequest},
    error::Result,
    models::Player,
    repository::{player::PlayerRepository, session::SessionRepository},
    store::DocumentStore,
};

/// List all players
pub async fn list_players(store: &dyn DocumentStore) -> Result<Vec<Player>> {
    PlayerRepository::new(store).list().await
}

pub async fn get_player(store: &dyn DocumentStore, id: &str) -> Result<Player> {
    PlayerRepository::new(store).find_by_id(id).await
}

pub async fn create_player(store: &dyn DocumentStore, request: &CreatePlayerRequest) -> Result<Player> {
    PlayerRepository::new(store).create(request).await
}

pub async fn update_player(
    store: &dyn DocumentStore,
    id: &str,
    request: &UpdatePlayerRequest,
) -> Result<Player> {
    PlayerRepository::new(store).update(id, request).await
}

/// Delete a player. Sessions they attended alone go with them; shared
/// sessions only lose them from their player list.
pub async fn delete_player(store: &dyn DocumentStore, id: &str) -> Result<()> {
    PlayerRepository::new(store).delete(id).await?;

    let cleanup = SessionRepository::new(store).delete_for_player(id).await?;
    tracing::info!(
        player_id = %id,
        removed = cleanup.removed,
        detached = cleanup.detached,
        "Deleted player and cleaned up their sessions"
    );

    Ok(())
}
