use storage::{
    dto::matches::{CreateMatchRequest, MatchFilter, UpdateMatchRequest},
    error::{Result, StorageError},
    models::Match,
    repository::{matches::MatchRepository, participation::ParticipationRepository},
    store::DocumentStore,
};

/// List matches, newest first
pub async fn list_matches(store: &dyn DocumentStore, filter: &MatchFilter) -> Result<Vec<Match>> {
    let month = filter.month_bounds().map_err(StorageError::Validation)?;

    MatchRepository::new(store).list(month, filter.team).await
}

pub async fn get_match(store: &dyn DocumentStore, id: &str) -> Result<Match> {
    MatchRepository::new(store).find_by_id(id).await
}

pub async fn create_match(store: &dyn DocumentStore, request: &CreateMatchRequest) -> Result<Match> {
    MatchRepository::new(store).create(request).await
}

pub async fn update_match(
    store: &dyn DocumentStore,
    id: &str,
    request: &UpdateMatchRequest,
) -> Result<Match> {
    MatchRepository::new(store).update(id, request).await
}

/// Delete a match and every participation recorded for it
pub async fn delete_match(store: &dyn DocumentStore, id: &str) -> Result<()> {
    MatchRepository::new(store).delete(id).await?;

    let removed = ParticipationRepository::new(store)
        .delete_for_match(id)
        .await?;
    tracing::info!(match_id = %id, participations = removed, "Deleted match");

    Ok(())
}
