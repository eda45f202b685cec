use std::sync::Arc;

pub mod dto;
pub mod error;
pub mod models;
pub mod normalize;
pub mod repository;
pub mod services;
pub mod store;

use error::Result;
use store::{DocumentStore, MemoryStore, PgDocumentStore};

/// Shared handle on the document store backing every repository.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
}

impl Database {
    /// Connects to PostgreSQL and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let store = PgDocumentStore::connect(database_url).await?;
        store.run_migrations().await?;
        Ok(Self::from_store(store))
    }

    pub fn in_memory() -> Self {
        Self::from_store(MemoryStore::new())
    }

    pub fn from_store(store: impl DocumentStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}
