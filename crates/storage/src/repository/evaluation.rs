use serde_json::Value;

use crate::error::{Result, StorageError};
use crate::models::PlayerEvaluation;
use crate::store::{Collection, Document, DocumentStore, Filter, Query, Sort};

use super::{from_document, from_documents, to_document};

pub struct EvaluationRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> EvaluationRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Stores a scored evaluation. An existing evaluation of the same type
    /// for the same player is overwritten in place and keeps its id.
    pub async fn upsert(&self, evaluation: &PlayerEvaluation) -> Result<PlayerEvaluation> {
        let stored = self
            .store
            .upsert_by_key(
                Collection::Evaluations,
                &PlayerEvaluation::NATURAL_KEY,
                to_document(evaluation)?,
            )
            .await?;
        from_document(stored)
    }

    pub async fn list(&self) -> Result<Vec<PlayerEvaluation>> {
        let docs = self
            .store
            .find_many(
                Collection::Evaluations,
                &Query::all().sort(Sort::desc("evaluation_date")),
            )
            .await?;
        from_documents(docs)
    }

    /// The player's evaluations, newest first
    pub async fn list_for_player(&self, player_id: &str) -> Result<Vec<PlayerEvaluation>> {
        let docs = self
            .store
            .find_many(
                Collection::Evaluations,
                &Query::new(Filter::eq("player_id", player_id))
                    .sort(Sort::desc("evaluation_date")),
            )
            .await?;
        from_documents(docs)
    }

    pub async fn latest_for_player(&self, player_id: &str) -> Result<Option<PlayerEvaluation>> {
        let docs = self
            .store
            .find_many(
                Collection::Evaluations,
                &Query::new(Filter::eq("player_id", player_id))
                    .sort(Sort::desc("evaluation_date"))
                    .limit(1),
            )
            .await?;

        docs.into_iter().next().map(from_document).transpose()
    }

    pub async fn list_for_players(&self, player_ids: &[String]) -> Result<Vec<PlayerEvaluation>> {
        if player_ids.is_empty() {
            return Ok(Vec::new());
        }

        let values = player_ids.iter().map(|id| Value::from(id.as_str())).collect();
        let docs = self
            .store
            .find_many(
                Collection::Evaluations,
                &Query::new(Filter::In("player_id".into(), values)),
            )
            .await?;
        from_documents(docs)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<PlayerEvaluation> {
        let doc = self
            .store
            .find_one(Collection::Evaluations, &Filter::id(id))
            .await?
            .ok_or(StorageError::NotFound)?;
        from_document(doc)
    }

    /// Writes back the themes, overall average and notes of a re-scored
    /// evaluation.
    pub async fn save_scores(&self, evaluation: &PlayerEvaluation) -> Result<PlayerEvaluation> {
        let mut patch = Document::new();
        patch.insert("themes".into(), serde_json::to_value(&evaluation.themes)?);
        patch.insert(
            "overall_average".into(),
            serde_json::to_value(evaluation.overall_average)?,
        );
        patch.insert("notes".into(), serde_json::to_value(&evaluation.notes)?);

        let doc = self
            .store
            .update_one(Collection::Evaluations, &Filter::id(&evaluation.id), patch)
            .await?
            .ok_or(StorageError::NotFound)?;
        from_document(doc)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self
            .store
            .delete_one(Collection::Evaluations, &Filter::id(id))
            .await?
        {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
