use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::collective_session::{CollectiveSessionFilter, CollectiveSessionRequest},
    models::CollectiveSession,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/collective-sessions",
    params(CollectiveSessionFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Collective sessions, newest first (at most 100)", body = Vec<CollectiveSession>),
        (status = 400, description = "Invalid month or year")
    ),
    tag = "collective-sessions"
)]
pub async fn list_collective_sessions(
    State(db): State<Database>,
    Query(filter): Query<CollectiveSessionFilter>,
) -> Result<Response, WebError> {
    let sessions = services::list_collective_sessions(db.store(), &filter).await?;

    Ok(Json(sessions).into_response())
}

#[utoipa::path(
    get,
    path = "/api/collective-sessions/{id}",
    params(
        ("id" = String, Path, description = "Collective session id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Collective session found", body = CollectiveSession),
        (status = 404, description = "Collective session not found")
    ),
    tag = "collective-sessions"
)]
pub async fn get_collective_session(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let session = services::get_collective_session(db.store(), &id).await?;

    Ok(Json(session).into_response())
}

#[utoipa::path(
    post,
    path = "/api/collective-sessions",
    request_body = CollectiveSessionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Collective session created", body = CollectiveSession),
        (status = 400, description = "Validation error")
    ),
    tag = "collective-sessions"
)]
pub async fn create_collective_session(
    State(db): State<Database>,
    Json(req): Json<CollectiveSessionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let session = services::create_collective_session(db.store(), &req).await?;

    Ok((StatusCode::CREATED, Json(session)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/collective-sessions/{id}",
    params(
        ("id" = String, Path, description = "Collective session id")
    ),
    request_body = CollectiveSessionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Collective session replaced", body = CollectiveSession),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Collective session not found")
    ),
    tag = "collective-sessions"
)]
pub async fn replace_collective_session(
    State(db): State<Database>,
    Path(id): Path<String>,
    Json(req): Json<CollectiveSessionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let session = services::replace_collective_session(db.store(), &id, &req).await?;

    Ok(Json(session).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/collective-sessions/{id}",
    params(
        ("id" = String, Path, description = "Collective session id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Collective session and its attendances deleted"),
        (status = 404, description = "Collective session not found")
    ),
    tag = "collective-sessions"
)]
pub async fn delete_collective_session(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    services::delete_collective_session(db.store(), &id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
