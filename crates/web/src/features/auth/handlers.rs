use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::json;
use storage::{Database, error::StorageError, models::User};

use crate::error::WebError;
use crate::middleware::auth::CallerIdentity;

use super::services;

#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The calling user", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "auth"
)]
pub async fn me(
    State(db): State<Database>,
    Extension(identity): Extension<CallerIdentity>,
) -> Result<Response, WebError> {
    let user = services::current_user(db.store(), &identity)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => WebError::not_found("User"),
            other => other.into(),
        })?;

    Ok(Json(user).into_response())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up")
    ),
    tag = "auth"
)]
pub async fn health() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}
