use crate::dto::coach::{CreateCoachRequest, UpdateCoachRequest};
use crate::error::{Result, StorageError};
use crate::models::{Coach, new_id};
use crate::store::{Collection, DocumentStore, Filter, Query};

use super::{from_document, from_documents, now, to_document, update_patch};

pub struct CoachRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> CoachRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Coach>> {
        let docs = self
            .store
            .find_many(Collection::Coaches, &Query::all())
            .await?;
        from_documents(docs)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Coach> {
        let doc = self
            .store
            .find_one(Collection::Coaches, &Filter::id(id))
            .await?
            .ok_or(StorageError::NotFound)?;
        from_document(doc)
    }

    /// First coach answering to `name` as first name, last name or
    /// "first last".
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Coach>> {
        let coaches = self.list().await?;
        Ok(coaches.into_iter().find(|coach| coach.answers_to(name)))
    }

    pub async fn create(&self, req: &CreateCoachRequest) -> Result<Coach> {
        let coach = Coach {
            id: new_id(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            photo: req.photo.clone(),
            created_at: now(),
        };

        self.store
            .insert_one(Collection::Coaches, to_document(&coach)?)
            .await?;
        Ok(coach)
    }

    pub async fn update(&self, id: &str, req: &UpdateCoachRequest) -> Result<Coach> {
        let patch = update_patch(req)?;

        let doc = self
            .store
            .update_one(Collection::Coaches, &Filter::id(id), patch)
            .await?
            .ok_or(StorageError::NotFound)?;
        from_document(doc)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.store.delete_one(Collection::Coaches, &Filter::id(id)).await? {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
