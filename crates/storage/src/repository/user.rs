use crate::error::{Result, StorageError};
use crate::models::{Role, User};
use crate::store::{Collection, DocumentStore, Filter, ID_FIELD};

use super::{from_document, now, to_document};

pub struct UserRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> UserRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<User> {
        let doc = self
            .store
            .find_one(Collection::Users, &Filter::id(id))
            .await?
            .ok_or(StorageError::NotFound)?;
        from_document(doc)
    }

    /// Creates the user, or refreshes the role of an existing one.
    pub async fn ensure(&self, id: &str, role: Role) -> Result<User> {
        let user = User {
            id: id.to_string(),
            role,
            created_at: now(),
        };

        let stored = self
            .store
            .upsert_by_key(Collection::Users, &[ID_FIELD], to_document(&user)?)
            .await?;
        from_document(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_ensure_is_repeatable() {
        let store = MemoryStore::new();
        let repo = UserRepository::new(&store);

        let first = repo.ensure("coach-1", Role::Coach).await.unwrap();
        let second = repo.ensure("coach-1", Role::Admin).await.unwrap();

        assert_eq!(first.created_at, second.created_at);
        assert_eq!(second.role, Role::Admin);
        assert_eq!(repo.find_by_id("coach-1").await.unwrap().role, Role::Admin);
    }
}
