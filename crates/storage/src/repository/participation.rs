use crate::dto::participation::{CreateParticipationRequest, UpdateParticipationRequest};
use crate::error::{Result, StorageError};
use crate::models::{MatchParticipation, new_id};
use crate::store::{Collection, DocumentStore, Filter, Query};

use super::{from_document, from_documents, now, to_document, update_patch};

pub struct ParticipationRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ParticipationRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Records the participation, replacing any earlier record for the same
    /// match and player.
    pub async fn upsert(&self, req: &CreateParticipationRequest) -> Result<MatchParticipation> {
        let participation = MatchParticipation {
            id: new_id(),
            match_id: req.match_id.clone(),
            player_id: req.player_id.clone(),
            is_present: req.is_present,
            is_starter: req.is_starter,
            play_time: req.play_time,
            notes: req.notes.clone(),
            created_at: now(),
        };

        let stored = self
            .store
            .upsert_by_key(
                Collection::MatchParticipations,
                &MatchParticipation::NATURAL_KEY,
                to_document(&participation)?,
            )
            .await?;
        from_document(stored)
    }

    pub async fn list_for_match(&self, match_id: &str) -> Result<Vec<MatchParticipation>> {
        let docs = self
            .store
            .find_many(
                Collection::MatchParticipations,
                &Query::new(Filter::eq("match_id", match_id)),
            )
            .await?;
        from_documents(docs)
    }

    pub async fn list_for_player(&self, player_id: &str) -> Result<Vec<MatchParticipation>> {
        let docs = self
            .store
            .find_many(
                Collection::MatchParticipations,
                &Query::new(Filter::eq("player_id", player_id)),
            )
            .await?;
        from_documents(docs)
    }

    pub async fn update(
        &self,
        id: &str,
        req: &UpdateParticipationRequest,
    ) -> Result<MatchParticipation> {
        let patch = update_patch(req)?;

        let doc = self
            .store
            .update_one(Collection::MatchParticipations, &Filter::id(id), patch)
            .await?
            .ok_or(StorageError::NotFound)?;
        from_document(doc)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self
            .store
            .delete_one(Collection::MatchParticipations, &Filter::id(id))
            .await?
        {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    pub async fn delete_for_match(&self, match_id: &str) -> Result<u64> {
        self.store
            .delete_many(
                Collection::MatchParticipations,
                &Filter::eq("match_id", match_id),
            )
            .await
    }
}
