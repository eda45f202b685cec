use crate::dto::attendance::{CreateAttendanceRequest, UpdateAttendanceRequest};
use crate::error::{Result, StorageError};
use crate::models::{Attendance, new_id};
use crate::store::{Collection, DocumentStore, Filter, Query};

use super::{from_document, from_documents, now, to_document, update_patch};

pub struct AttendanceRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> AttendanceRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Records the attendance, replacing any earlier record for the same
    /// session and player. The earlier record keeps its id.
    pub async fn upsert(&self, req: &CreateAttendanceRequest) -> Result<Attendance> {
        let attendance = Attendance {
            id: new_id(),
            collective_session_id: req.collective_session_id.clone(),
            player_id: req.player_id.clone(),
            status: req.status,
            notes: req.notes.clone(),
            created_at: now(),
        };

        let stored = self
            .store
            .upsert_by_key(
                Collection::Attendances,
                &Attendance::NATURAL_KEY,
                to_document(&attendance)?,
            )
            .await?;
        from_document(stored)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Attendance> {
        let doc = self
            .store
            .find_one(Collection::Attendances, &Filter::id(id))
            .await?
            .ok_or(StorageError::NotFound)?;
        from_document(doc)
    }

    pub async fn list_for_session(&self, collective_session_id: &str) -> Result<Vec<Attendance>> {
        let docs = self
            .store
            .find_many(
                Collection::Attendances,
                &Query::new(Filter::eq("collective_session_id", collective_session_id)),
            )
            .await?;
        from_documents(docs)
    }

    pub async fn list_for_player(&self, player_id: &str) -> Result<Vec<Attendance>> {
        let docs = self
            .store
            .find_many(
                Collection::Attendances,
                &Query::new(Filter::eq("player_id", player_id)),
            )
            .await?;
        from_documents(docs)
    }

    pub async fn update(&self, id: &str, req: &UpdateAttendanceRequest) -> Result<Attendance> {
        let patch = update_patch(req)?;

        let doc = self
            .store
            .update_one(Collection::Attendances, &Filter::id(id), patch)
            .await?
            .ok_or(StorageError::NotFound)?;
        from_document(doc)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self
            .store
            .delete_one(Collection::Attendances, &Filter::id(id))
            .await?
        {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    pub async fn delete_for_session(&self, collective_session_id: &str) -> Result<u64> {
        self.store
            .delete_many(
                Collection::Attendances,
                &Filter::eq("collective_session_id", collective_session_id),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceStatus;
    use crate::store::MemoryStore;

    fn request(status: AttendanceStatus, notes: Option<&str>) -> CreateAttendanceRequest {
        CreateAttendanceRequest {
            collective_session_id: "cs1".into(),
            player_id: "p1".into(),
            status,
            notes: notes.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_resubmission_replaces_the_record() {
        let store = MemoryStore::new();
        let repo = AttendanceRepository::new(&store);

        let first = repo
            .upsert(&request(AttendanceStatus::Absent, None))
            .await
            .unwrap();
        let second = repo
            .upsert(&request(AttendanceStatus::Present, Some("late")))
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.status, AttendanceStatus::Present);
        assert_eq!(second.notes.as_deref(), Some("late"));
        assert_eq!(repo.list_for_session("cs1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_changes_status_only() {
        let store = MemoryStore::new();
        let repo = AttendanceRepository::new(&store);
        let created = repo
            .upsert(&request(AttendanceStatus::Present, Some("keep")))
            .await
            .unwrap();

        let updated = repo
            .update(
                &created.id,
                &UpdateAttendanceRequest {
                    status: Some(AttendanceStatus::Injured),
                    notes: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, AttendanceStatus::Injured);
        assert_eq!(updated.notes.as_deref(), Some("keep"));
    }
}
