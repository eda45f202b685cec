use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use storage::models::Role;

use crate::error::WebError;

const DEFAULT_USER_ID: &str = "api";

/// Who is calling, as resolved from their API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: String,
    pub role: Role,
}

/// Rejects requests without a known bearer key and attaches the caller's
/// [`CallerIdentity`] to the ones it lets through.
pub async fn require_auth(
    State(api_keys): State<ApiKeys>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(identity) = token.and_then(|token| api_keys.identify(token)).cloned() else {
        tracing::warn!("Invalid API key attempt");
        return Err(WebError::Unauthorized);
    };

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    keys: Arc<HashMap<String, CallerIdentity>>,
}

impl ApiKeys {
    /// Parses `token[:user_id[:role]]` entries separated by commas. The user
    /// id defaults to "api" and the role to coach.
    pub fn from_comma_separated(keys_str: &str) -> Result<Self, String> {
        let mut keys = HashMap::new();

        for entry in keys_str.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let mut parts = entry.splitn(3, ':').map(str::trim);
            let token = parts.next().unwrap_or_default();
            let user_id = parts
                .next()
                .filter(|id| !id.is_empty())
                .unwrap_or(DEFAULT_USER_ID);
            let role = match parts.next().filter(|role| !role.is_empty()) {
                Some(role) => role.parse::<Role>()?,
                None => Role::Coach,
            };

            if token.is_empty() {
                return Err(format!("API key entry '{}' has an empty token", entry));
            }

            keys.insert(
                token.to_string(),
                CallerIdentity {
                    user_id: user_id.to_string(),
                    role,
                },
            );
        }

        Ok(Self {
            keys: Arc::new(keys),
        })
    }

    pub fn identify(&self, key: &str) -> Option<&CallerIdentity> {
        self.keys.get(key)
    }

    pub fn identities(&self) -> impl Iterator<Item = &CallerIdentity> {
        self.keys.values()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_full_and_short_entries() {
        let keys = ApiKeys::from_comma_separated("k1:alice:admin, k2 ,k3:bob").unwrap();

        assert_eq!(
            keys.identify("k1"),
            Some(&CallerIdentity {
                user_id: "alice".into(),
                role: Role::Admin
            })
        );
        assert_eq!(keys.identify("k2").unwrap().user_id, "api");
        assert_eq!(keys.identify("k3").unwrap().role, Role::Coach);
        assert!(keys.identify("k4").is_none());
    }

    #[test]
    fn test_rejects_unknown_role() {
        assert!(ApiKeys::from_comma_separated("k1:alice:referee").is_err());
    }

    #[test]
    fn test_blank_configuration_has_no_keys() {
        assert!(ApiKeys::from_comma_separated(" , ").unwrap().is_empty());
    }
}
