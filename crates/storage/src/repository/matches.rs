use crate::dto::matches::{CreateMatchRequest, UpdateMatchRequest};
use crate::error::{Result, StorageError};
use crate::models::{Match, Team, new_id};
use crate::store::{Collection, DocumentStore, Filter, Query, Sort};

use super::{from_document, from_documents, now, to_document, update_patch};

pub struct MatchRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> MatchRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Newest first, optionally restricted to `[from, until)` and a team.
    pub async fn list(
        &self,
        month: Option<(String, String)>,
        team: Option<Team>,
    ) -> Result<Vec<Match>> {
        let mut filter = Filter::All;
        if let Some((from, until)) = month {
            filter = filter
                .and(Filter::Gte("match_date".into(), from))
                .and(Filter::Lt("match_date".into(), until));
        }
        if let Some(team) = team {
            filter = filter.and(Filter::eq("team", team.as_str()));
        }

        let docs = self
            .store
            .find_many(
                Collection::Matches,
                &Query::new(filter).sort(Sort::desc("match_date")),
            )
            .await?;
        from_documents(docs)
    }

    pub async fn list_by_ids(&self, ids: &[String]) -> Result<Vec<Match>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let values = ids.iter().map(|id| id.as_str().into()).collect();
        let docs = self
            .store
            .find_many(
                Collection::Matches,
                &Query::new(Filter::In("id".into(), values)),
            )
            .await?;
        from_documents(docs)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Match> {
        let doc = self
            .store
            .find_one(Collection::Matches, &Filter::id(id))
            .await?
            .ok_or(StorageError::NotFound)?;
        from_document(doc)
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.store.count(Collection::Matches, &Filter::id(id)).await? > 0)
    }

    pub async fn create(&self, req: &CreateMatchRequest) -> Result<Match> {
        let game = Match {
            id: new_id(),
            team: req.team,
            opponent: req.opponent.clone(),
            match_date: req.match_date,
            match_time: req.match_time.clone(),
            location: req.location.clone(),
            is_home: req.is_home,
            competition: req.competition.clone(),
            final_score_us: req.final_score_us,
            final_score_opponent: req.final_score_opponent,
            coach: req.coach.clone(),
            notes: req.notes.clone(),
            created_at: now(),
        };

        self.store
            .insert_one(Collection::Matches, to_document(&game)?)
            .await?;
        Ok(game)
    }

    pub async fn update(&self, id: &str, req: &UpdateMatchRequest) -> Result<Match> {
        let patch = update_patch(req)?;

        let doc = self
            .store
            .update_one(Collection::Matches, &Filter::id(id), patch)
            .await?
            .ok_or(StorageError::NotFound)?;
        from_document(doc)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.store.delete_one(Collection::Matches, &Filter::id(id)).await? {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
