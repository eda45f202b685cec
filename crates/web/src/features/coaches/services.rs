use storage::{
    dto::coach::{CreateCoachRequest, UpdateCoachRequest},
    error::Result,
    models::Coach,
    repository::coach::CoachRepository,
    store::DocumentStore,
};

pub async fn list_coaches(store: &dyn DocumentStore) -> Result<Vec<Coach>> {
    CoachRepository::new(store).list().await
}

pub async fn get_coach(store: &dyn DocumentStore, id: &str) -> Result<Coach> {
    CoachRepository::new(store).find_by_id(id).await
}

pub async fn create_coach(store: &dyn DocumentStore, request: &CreateCoachRequest) -> Result<Coach> {
    CoachRepository::new(store).create(request).await
}

pub async fn update_coach(
    store: &dyn DocumentStore,
    id: &str,
    request: &UpdateCoachRequest,
) -> Result<Coach> {
    CoachRepository::new(store).update(id, request).await
}

pub async fn delete_coach(store: &dyn DocumentStore, id: &str) -> Result<()> {
    CoachRepository::new(store).delete(id).await
}
