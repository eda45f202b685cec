use crate::dto::player::{CreatePlayerRequest, UpdatePlayerRequest};
use crate::error::{Result, StorageError};
use crate::models::{Player, new_id};
use crate::store::{Collection, DocumentStore, Filter, Query, Sort};

use super::{from_document, from_documents, now, to_document, update_patch};

pub struct PlayerRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// List all players, by last name
    pub async fn list(&self) -> Result<Vec<Player>> {
        let docs = self
            .store
            .find_many(Collection::Players, &Query::all().sort(Sort::asc("last_name")))
            .await?;
        from_documents(docs)
    }

    pub async fn list_by_position(&self, position: &str) -> Result<Vec<Player>> {
        let docs = self
            .store
            .find_many(
                Collection::Players,
                &Query::new(Filter::eq("position", position)).sort(Sort::asc("last_name")),
            )
            .await?;
        from_documents(docs)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Player> {
        let doc = self
            .store
            .find_one(Collection::Players, &Filter::id(id))
            .await?
            .ok_or(StorageError::NotFound)?;
        from_document(doc)
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.store.count(Collection::Players, &Filter::id(id)).await? > 0)
    }

    pub async fn create(&self, req: &CreatePlayerRequest) -> Result<Player> {
        let player = Player {
            id: new_id(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            date_of_birth: req.date_of_birth,
            position: req.position.clone(),
            coach_referent: req.coach_referent.clone(),
            photo: req.photo.clone(),
            created_at: now(),
        };

        self.store
            .insert_one(Collection::Players, to_document(&player)?)
            .await?;
        Ok(player)
    }

    pub async fn update(&self, id: &str, req: &UpdatePlayerRequest) -> Result<Player> {
        let patch = update_patch(req)?;

        let doc = self
            .store
            .update_one(Collection::Players, &Filter::id(id), patch)
            .await?
            .ok_or(StorageError::NotFound)?;
        from_document(doc)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.store.delete_one(Collection::Players, &Filter::id(id)).await? {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
