use serde_json::Value;

use crate::dto::session::{CreateSessionRequest, UpdateSessionRequest};
use crate::error::{Result, StorageError};
use crate::models::{Session, new_id};
use crate::normalize::normalize_session;
use crate::store::{Collection, Document, DocumentStore, Filter, Query, Sort};

use super::{from_document, now, to_document, update_patch};

/// Individual training sessions. Every session leaving this repository has
/// been through [`normalize_session`], whatever generation it was stored as.
pub struct SessionRepository<'a> {
    store: &'a dyn DocumentStore,
}

fn to_session(doc: Document) -> Result<Session> {
    from_document(normalize_session(doc))
}

fn to_sessions(docs: Vec<Document>) -> Result<Vec<Session>> {
    docs.into_iter().map(to_session).collect()
}

/// Generation 2 fields and the generation 1 field each one supersedes.
const SUPERSEDED_FIELDS: [(&str, &str); 4] = [
    ("player_ids", "player_id"),
    ("themes", "content"),
    ("trainers", "trainer"),
    ("content_details", "results"),
];

/// Outcome of removing a player from the sessions naming them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerSessionCleanup {
    /// Sessions the player attended alone, deleted.
    pub removed: u64,
    /// Shared sessions the player was taken out of.
    pub detached: u64,
}

/// Candidate sessions naming the player under either generation's field.
/// Stale legacy fields can make this match too much, so results are checked
/// against the normalized session.
fn involving(player_id: &str) -> Filter {
    Filter::Or(vec![
        Filter::contains("player_ids", player_id),
        Filter::eq("player_id", player_id),
    ])
}

impl<'a> SessionRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// All sessions, newest first
    pub async fn list(&self) -> Result<Vec<Session>> {
        let docs = self
            .store
            .find_many(
                Collection::Sessions,
                &Query::all().sort(Sort::desc("session_date")),
            )
            .await?;
        to_sessions(docs)
    }

    pub async fn list_for_player(&self, player_id: &str) -> Result<Vec<Session>> {
        let docs = self
            .store
            .find_many(
                Collection::Sessions,
                &Query::new(involving(player_id)).sort(Sort::desc("session_date")),
            )
            .await?;

        let mut sessions = to_sessions(docs)?;
        sessions.retain(|s| s.involves(player_id));
        Ok(sessions)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Session> {
        let doc = self
            .store
            .find_one(Collection::Sessions, &Filter::id(id))
            .await?
            .ok_or(StorageError::NotFound)?;
        to_session(doc)
    }

    pub async fn create(&self, req: &CreateSessionRequest) -> Result<Session> {
        let session = Session {
            id: new_id(),
            player_ids: req.player_ids.clone(),
            session_date: req.session_date.to_string(),
            themes: req.themes.clone(),
            trainers: req.trainers.clone(),
            content_details: req.content_details.clone(),
            notes: req.notes.clone(),
            created_at: Some(now()),
        };

        self.store
            .insert_one(Collection::Sessions, to_document(&session)?)
            .await?;
        Ok(session)
    }

    /// Partial update. Legacy fields superseded by the patch are cleared so
    /// the stored document no longer answers to them.
    pub async fn update(&self, id: &str, req: &UpdateSessionRequest) -> Result<Session> {
        let mut patch = update_patch(req)?;
        for (current, legacy) in SUPERSEDED_FIELDS {
            if patch.contains_key(current) {
                patch.insert(legacy.to_string(), Value::Null);
            }
        }

        let doc = self
            .store
            .update_one(Collection::Sessions, &Filter::id(id), patch)
            .await?
            .ok_or(StorageError::NotFound)?;
        to_session(doc)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.store.delete_one(Collection::Sessions, &Filter::id(id)).await? {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    /// Deletes the sessions the player attended alone and takes the player
    /// out of the shared ones, so teammates keep their history.
    pub async fn delete_for_player(&self, player_id: &str) -> Result<PlayerSessionCleanup> {
        let mut cleanup = PlayerSessionCleanup::default();

        for session in self.list_for_player(player_id).await? {
            let others: Vec<String> = session
                .player_ids
                .iter()
                .filter(|id| *id != player_id)
                .cloned()
                .collect();

            if others.is_empty() {
                if self
                    .store
                    .delete_one(Collection::Sessions, &Filter::id(&session.id))
                    .await?
                {
                    cleanup.removed += 1;
                }
                continue;
            }

            let mut patch = Document::new();
            patch.insert("player_ids".into(), Value::from(others));
            patch.insert("player_id".into(), Value::Null);
            if self
                .store
                .update_one(Collection::Sessions, &Filter::id(&session.id), patch)
                .await?
                .is_some()
            {
                cleanup.detached += 1;
            }
        }

        Ok(cleanup)
    }
}
