//! Document store abstraction.
//!
//! Every collection holds JSON objects carrying a string `id`. Repositories
//! talk to the store only through [`DocumentStore`], so the in-memory and
//! PostgreSQL backends are interchangeable.

use std::cmp::Ordering;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

pub type Document = Map<String, Value>;

/// Field holding the document identity in every collection.
pub const ID_FIELD: &str = "id";

/// Fields an upsert never overwrites on an existing document.
pub const PRESERVED_ON_UPSERT: &[&str] = &[ID_FIELD, "created_at"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Players,
    Coaches,
    Sessions,
    CollectiveSessions,
    Attendances,
    Matches,
    MatchParticipations,
    Evaluations,
    Users,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Players => "players",
            Self::Coaches => "coaches",
            Self::Sessions => "sessions",
            Self::CollectiveSessions => "collective_sessions",
            Self::Attendances => "attendances",
            Self::Matches => "matches",
            Self::MatchParticipations => "match_participations",
            Self::Evaluations => "evaluations",
            Self::Users => "users",
        }
    }
}

/// Predicate over documents.
///
/// `Gte`/`Lt` compare string fields lexicographically, which is what ISO
/// dates need.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    Eq(String, Value),
    /// The field is an array containing the value.
    Contains(String, Value),
    In(String, Vec<Value>),
    Gte(String, String),
    Lt(String, String),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self::Eq(field.to_string(), value.into())
    }

    pub fn contains(field: &str, value: impl Into<Value>) -> Self {
        Self::Contains(field.to_string(), value.into())
    }

    pub fn id(id: &str) -> Self {
        Self::eq(ID_FIELD, id)
    }

    pub fn and(self, other: Filter) -> Self {
        match self {
            Self::All => other,
            Self::And(mut filters) => {
                filters.push(other);
                Self::And(filters)
            }
            filter => Self::And(vec![filter, other]),
        }
    }

    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::All => true,
            Self::Eq(field, value) => doc.get(field) == Some(value),
            Self::Contains(field, value) => matches!(
                doc.get(field),
                Some(Value::Array(items)) if items.contains(value)
            ),
            Self::In(field, values) => doc.get(field).is_some_and(|v| values.contains(v)),
            Self::Gte(field, bound) => string_field(doc, field).is_some_and(|v| v >= bound.as_str()),
            Self::Lt(field, bound) => string_field(doc, field).is_some_and(|v| v < bound.as_str()),
            Self::And(filters) => filters.iter().all(|f| f.matches(doc)),
            Self::Or(filters) => filters.iter().any(|f| f.matches(doc)),
        }
    }
}

fn string_field<'a>(doc: &'a Document, field: &str) -> Option<&'a str> {
    doc.get(field).and_then(Value::as_str)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub descending: bool,
}

impl Sort {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            descending: false,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            descending: true,
        }
    }

    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let ordering = compare_values(a.get(&self.field), b.get(&self.field));
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Missing values sort before present ones; mismatched types compare equal.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub filter: Filter,
    pub sort: Option<Sort>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            sort: None,
            limit: None,
        }
    }

    pub fn all() -> Self {
        Self::new(Filter::All)
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a document. It must carry a string `id`.
    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<Document>;

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>>;

    async fn find_many(&self, collection: Collection, query: &Query) -> Result<Vec<Document>>;

    /// Merges `patch` into the first matching document and returns the
    /// result, or `None` when nothing matched. The `id` field is never
    /// patched.
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        patch: Document,
    ) -> Result<Option<Document>>;

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<bool>;

    async fn delete_many(&self, collection: Collection, filter: &Filter) -> Result<u64>;

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64>;

    /// Atomically inserts `doc`, or, when a document with the same values
    /// for `key_fields` exists, overwrites its fields with those of `doc`
    /// except for [`PRESERVED_ON_UPSERT`]. Returns the stored document.
    async fn upsert_by_key(
        &self,
        collection: Collection,
        key_fields: &[&str],
        doc: Document,
    ) -> Result<Document>;
}

/// Merges `patch` over `target`, skipping the fields in `preserved`.
pub(crate) fn merge_into(target: &mut Document, patch: Document, preserved: &[&str]) {
    for (key, value) in patch {
        if !preserved.contains(&key.as_str()) {
            target.insert(key, value);
        }
    }
}

/// Values of the natural key fields, in order. `Value::Null` for absent ones.
pub(crate) fn natural_key(doc: &Document, key_fields: &[&str]) -> Vec<Value> {
    key_fields
        .iter()
        .map(|field| doc.get(*field).cloned().unwrap_or(Value::Null))
        .collect()
}
