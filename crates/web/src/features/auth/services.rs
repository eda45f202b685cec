use storage::{
    error::Result, models::User, repository::user::UserRepository, store::DocumentStore,
};

use crate::middleware::auth::{ApiKeys, CallerIdentity};

/// Makes sure every configured caller has a user record.
pub async fn bootstrap_users(store: &dyn DocumentStore, api_keys: &ApiKeys) -> Result<usize> {
    let users = UserRepository::new(store);
    let mut count = 0;

    for identity in api_keys.identities() {
        users.ensure(&identity.user_id, identity.role).await?;
        count += 1;
    }

    Ok(count)
}

/// The user record behind the caller's API key.
pub async fn current_user(store: &dyn DocumentStore, identity: &CallerIdentity) -> Result<User> {
    UserRepository::new(store).find_by_id(&identity.user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{Database, error::StorageError, models::Role};

    #[tokio::test]
    async fn test_current_user_after_bootstrap() {
        let db = Database::in_memory();
        UserRepository::new(db.store())
            .ensure("coach-1", Role::Coach)
            .await
            .unwrap();
        let identity = CallerIdentity {
            user_id: "coach-1".into(),
            role: Role::Coach,
        };

        let user = current_user(db.store(), &identity).await.unwrap();

        assert_eq!(user.id, "coach-1");
        assert_eq!(user.role, Role::Coach);
    }

    #[tokio::test]
    async fn test_bootstrap_creates_configured_users() {
        let db = Database::in_memory();
        let keys = ApiKeys::from_comma_separated("k1:alice:admin,k2:bob").unwrap();

        let count = bootstrap_users(db.store(), &keys).await.unwrap();
        bootstrap_users(db.store(), &keys).await.unwrap();

        let users = UserRepository::new(db.store());
        assert_eq!(count, 2);
        assert_eq!(users.find_by_id("alice").await.unwrap().role, Role::Admin);
        assert_eq!(users.find_by_id("bob").await.unwrap().role, Role::Coach);
    }

    #[tokio::test]
    async fn test_unknown_caller_is_not_found() {
        let db = Database::in_memory();
        let identity = CallerIdentity {
            user_id: "nobody".into(),
            role: Role::Admin,
        };

        let result = current_user(db.store(), &identity).await;

        assert!(matches!(result, Err(StorageError::NotFound)));
    }
}
