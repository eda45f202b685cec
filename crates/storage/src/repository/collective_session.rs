use crate::dto::collective_session::CollectiveSessionRequest;
use crate::error::{Result, StorageError};
use crate::models::{CollectiveSession, new_id};
use crate::store::{Collection, DocumentStore, Filter, Query, Sort};

use super::{from_document, from_documents, now, to_document};

/// Most collective sessions a single listing returns.
pub const LIST_LIMIT: usize = 100;

pub struct CollectiveSessionRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> CollectiveSessionRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Newest first, optionally restricted to `[from, until)` and a type.
    pub async fn list(
        &self,
        month: Option<(String, String)>,
        session_type: Option<&str>,
    ) -> Result<Vec<CollectiveSession>> {
        let mut filter = Filter::All;
        if let Some((from, until)) = month {
            filter = filter
                .and(Filter::Gte("session_date".into(), from))
                .and(Filter::Lt("session_date".into(), until));
        }
        if let Some(session_type) = session_type {
            filter = filter.and(Filter::eq("session_type", session_type));
        }

        let docs = self
            .store
            .find_many(
                Collection::CollectiveSessions,
                &Query::new(filter)
                    .sort(Sort::desc("session_date"))
                    .limit(LIST_LIMIT),
            )
            .await?;
        from_documents(docs)
    }

    pub async fn list_by_ids(&self, ids: &[String]) -> Result<Vec<CollectiveSession>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let values = ids.iter().map(|id| id.as_str().into()).collect();
        let docs = self
            .store
            .find_many(
                Collection::CollectiveSessions,
                &Query::new(Filter::In("id".into(), values)),
            )
            .await?;
        from_documents(docs)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<CollectiveSession> {
        let doc = self
            .store
            .find_one(Collection::CollectiveSessions, &Filter::id(id))
            .await?
            .ok_or(StorageError::NotFound)?;
        from_document(doc)
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self
            .store
            .count(Collection::CollectiveSessions, &Filter::id(id))
            .await?
            > 0)
    }

    pub async fn create(&self, req: &CollectiveSessionRequest) -> Result<CollectiveSession> {
        let session = CollectiveSession {
            id: new_id(),
            session_type: req.session_type.clone(),
            session_date: req.session_date.to_string(),
            session_time: req.session_time.clone(),
            location: req.location.clone(),
            coach: req.coach.clone(),
            notes: req.notes.clone(),
            created_at: now(),
        };

        self.store
            .insert_one(Collection::CollectiveSessions, to_document(&session)?)
            .await?;
        Ok(session)
    }

    /// Overwrites every editable field with the request's values.
    pub async fn replace(
        &self,
        id: &str,
        req: &CollectiveSessionRequest,
    ) -> Result<CollectiveSession> {
        let patch = to_document(req)?;

        let doc = self
            .store
            .update_one(Collection::CollectiveSessions, &Filter::id(id), patch)
            .await?
            .ok_or(StorageError::NotFound)?;
        from_document(doc)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self
            .store
            .delete_one(Collection::CollectiveSessions, &Filter::id(id))
            .await?
        {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
