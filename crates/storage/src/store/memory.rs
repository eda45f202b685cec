use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    Collection, Document, DocumentStore, Filter, ID_FIELD, PRESERVED_ON_UPSERT, Query, merge_into,
    natural_key,
};
use crate::error::{Result, StorageError};

/// Store keeping every collection in process memory, in insertion order.
///
/// Each operation holds the lock for its whole duration, which makes
/// `upsert_by_key` a single atomic find-and-replace.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn require_id(doc: &Document) -> Result<()> {
    match doc.get(ID_FIELD) {
        Some(serde_json::Value::String(_)) => Ok(()),
        _ => Err(StorageError::validation("document is missing a string id")),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<Document> {
        require_id(&doc)?;

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        if docs.iter().any(|d| d.get(ID_FIELD) == doc.get(ID_FIELD)) {
            return Err(StorageError::ConstraintViolation(format!(
                "duplicate id in {}",
                collection.as_str()
            )));
        }

        docs.push(doc.clone());
        Ok(doc)
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        let collections = self.collections.read().await;

        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn find_many(&self, collection: Collection, query: &Query) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;

        let mut found: Vec<Document> = collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| query.filter.matches(d))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = &query.sort {
            found.sort_by(|a, b| sort.compare(a, b));
        }
        if let Some(limit) = query.limit {
            found.truncate(limit);
        }

        Ok(found)
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        patch: Document,
    ) -> Result<Option<Document>> {
        let mut collections = self.collections.write().await;

        let Some(target) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| filter.matches(d)))
        else {
            return Ok(None);
        };

        merge_into(target, patch, &[ID_FIELD]);
        Ok(Some(target.clone()))
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<bool> {
        let mut collections = self.collections.write().await;

        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };

        match docs.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                docs.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_many(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        let mut collections = self.collections.write().await;

        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(0);
        };

        let before = docs.len();
        docs.retain(|d| !filter.matches(d));
        Ok((before - docs.len()) as u64)
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        let collections = self.collections.read().await;

        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).count())
            .unwrap_or(0) as u64)
    }

    async fn upsert_by_key(
        &self,
        collection: Collection,
        key_fields: &[&str],
        doc: Document,
    ) -> Result<Document> {
        require_id(&doc)?;
        let key = natural_key(&doc, key_fields);

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        if let Some(existing) = docs
            .iter_mut()
            .find(|d| natural_key(d, key_fields) == key)
        {
            merge_into(existing, doc, PRESERVED_ON_UPSERT);
            return Ok(existing.clone());
        }

        docs.push(doc.clone());
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Sort;
    use serde_json::{Value, json};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[tokio::test]
    async fn test_find_many_sorts_and_limits() {
        let store = MemoryStore::new();
        for (id, date) in [("a", "2026-01-03"), ("b", "2026-01-01"), ("c", "2026-01-02")] {
            store
                .insert_one(Collection::Matches, doc(json!({"id": id, "match_date": date})))
                .await
                .unwrap();
        }

        let found = store
            .find_many(
                Collection::Matches,
                &Query::all().sort(Sort::desc("match_date")).limit(2),
            )
            .await
            .unwrap();

        let ids: Vec<&str> = found.iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = MemoryStore::new();
        store
            .insert_one(Collection::Players, doc(json!({"id": "p1"})))
            .await
            .unwrap();

        let result = store
            .insert_one(Collection::Players, doc(json!({"id": "p1"})))
            .await;

        assert!(matches!(result, Err(StorageError::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn test_upsert_by_key_keeps_a_single_record() {
        let store = MemoryStore::new();
        let key = ["collective_session_id", "player_id"];

        let first = store
            .upsert_by_key(
                Collection::Attendances,
                &key,
                doc(json!({"id": "a1", "collective_session_id": "s1", "player_id": "p1", "status": "absent"})),
            )
            .await
            .unwrap();
        let second = store
            .upsert_by_key(
                Collection::Attendances,
                &key,
                doc(json!({"id": "a2", "collective_session_id": "s1", "player_id": "p1", "status": "present"})),
            )
            .await
            .unwrap();

        assert_eq!(first["id"], "a1");
        assert_eq!(second["id"], "a1");
        assert_eq!(second["status"], "present");
        assert_eq!(
            store.count(Collection::Attendances, &Filter::All).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_report_misses() {
        let store = MemoryStore::new();

        let updated = store
            .update_one(Collection::Coaches, &Filter::id("missing"), Document::new())
            .await
            .unwrap();
        let deleted = store
            .delete_one(Collection::Coaches, &Filter::id("missing"))
            .await
            .unwrap();

        assert!(updated.is_none());
        assert!(!deleted);
    }
}
