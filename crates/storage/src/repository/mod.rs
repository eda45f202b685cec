//! Typed access to the document collections.
//!
//! Each repository borrows the store for the duration of a request and
//! converts between documents and models at the boundary.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{Result, StorageError};
use crate::store::Document;

pub mod attendance;
pub mod coach;
pub mod collective_session;
pub mod evaluation;
pub mod matches;
pub mod participation;
pub mod player;
pub mod session;
pub mod user;

pub(crate) fn to_document<T: Serialize>(value: &T) -> Result<Document> {
    match serde_json::to_value(value)? {
        Value::Object(doc) => Ok(doc),
        other => Err(StorageError::validation(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

pub(crate) fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(doc))?)
}

pub(crate) fn from_documents<T: DeserializeOwned>(docs: Vec<Document>) -> Result<Vec<T>> {
    docs.into_iter().map(from_document).collect()
}

/// Document holding the fields set in a partial update request.
/// Fails when the request sets nothing.
pub(crate) fn update_patch<T: Serialize>(request: &T) -> Result<Document> {
    let patch: Document = to_document(request)?
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .collect();

    if patch.is_empty() {
        return Err(StorageError::validation("No data to update"));
    }
    Ok(patch)
}

pub(crate) fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}
