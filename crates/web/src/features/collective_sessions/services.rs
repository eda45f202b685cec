use storage::{
    dto::collective_session::{CollectiveSessionFilter, CollectiveSessionRequest},
    error::{Result, StorageError},
    models::CollectiveSession,
    repository::{
        attendance::AttendanceRepository, collective_session::CollectiveSessionRepository,
    },
    store::DocumentStore,
};

pub async fn list_collective_sessions(
    store: &dyn DocumentStore,
    filter: &CollectiveSessionFilter,
) -> Result<Vec<CollectiveSession>> {
    let month = filter.month_bounds().map_err(StorageError::Validation)?;

    CollectiveSessionRepository::new(store)
        .list(month, filter.session_type.as_deref())
        .await
}

pub async fn get_collective_session(store: &dyn DocumentStore, id: &str) -> Result<CollectiveSession> {
    CollectiveSessionRepository::new(store).find_by_id(id).await
}

pub async fn create_collective_session(
    store: &dyn DocumentStore,
    request: &CollectiveSessionRequest,
) -> Result<CollectiveSession> {
    CollectiveSessionRepository::new(store).create(request).await
}

pub async fn replace_collective_session(
    store: &dyn DocumentStore,
    id: &str,
    request: &CollectiveSessionRequest,
) -> Result<CollectiveSession> {
    CollectiveSessionRepository::new(store).replace(id, request).await
}

/// Delete a collective session and the attendances recorded for it
pub async fn delete_collective_session(store: &dyn DocumentStore, id: &str) -> Result<()> {
    CollectiveSessionRepository::new(store).delete(id).await?;

    let removed = AttendanceRepository::new(store).delete_for_session(id).await?;
    tracing::info!(collective_session_id = %id, attendances = removed, "Deleted collective session");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::date;
    use storage::{Database, dto::attendance::CreateAttendanceRequest, models::AttendanceStatus};

    fn request(session_type: &str, day: u32, month: u32) -> CollectiveSessionRequest {
        CollectiveSessionRequest {
            session_type: session_type.into(),
            session_date: date(2026, month, day),
            session_time: "18:30".into(),
            location: Some("Gymnase".into()),
            coach: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_month_and_type() {
        let db = Database::in_memory();
        for (kind, day, month) in [("U18", 3, 9), ("U21", 20, 9), ("U18", 1, 10)] {
            create_collective_session(db.store(), &request(kind, day, month))
                .await
                .unwrap();
        }

        let september = CollectiveSessionFilter {
            month: Some(9),
            year: Some(2026),
            session_type: None,
        };
        let u18_september = CollectiveSessionFilter {
            session_type: Some("U18".into()),
            ..september.clone()
        };

        let all = list_collective_sessions(db.store(), &september).await.unwrap();
        let u18 = list_collective_sessions(db.store(), &u18_september).await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].session_date, "2026-09-20");
        assert_eq!(u18.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_month_is_a_validation_error() {
        let db = Database::in_memory();
        let filter = CollectiveSessionFilter {
            month: Some(13),
            year: Some(2026),
            session_type: None,
        };

        let result = list_collective_sessions(db.store(), &filter).await;

        assert!(matches!(result, Err(StorageError::Validation(_))));
    }

    #[tokio::test]
    async fn test_replace_overwrites_optional_fields() {
        let db = Database::in_memory();
        let created = create_collective_session(db.store(), &request("U18", 3, 9))
            .await
            .unwrap();

        let mut replacement = request("musculation", 4, 9);
        replacement.location = None;
        let replaced = replace_collective_session(db.store(), &created.id, &replacement)
            .await
            .unwrap();

        assert_eq!(replaced.id, created.id);
        assert_eq!(replaced.session_type, "musculation");
        assert_eq!(replaced.location, None);
        assert_eq!(replaced.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_delete_cascades_attendances() {
        let db = Database::in_memory();
        let session = create_collective_session(db.store(), &request("U18", 3, 9))
            .await
            .unwrap();
        let attendances = AttendanceRepository::new(db.store());
        attendances
            .upsert(&CreateAttendanceRequest {
                collective_session_id: session.id.clone(),
                player_id: "p1".into(),
                status: AttendanceStatus::Present,
                notes: None,
            })
            .await
            .unwrap();

        delete_collective_session(db.store(), &session.id).await.unwrap();

        assert!(attendances.list_for_player("p1").await.unwrap().is_empty());
    }
}
