use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::session::{CreateSessionRequest, UpdateSessionRequest},
    models::Session,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/sessions",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All individual sessions, newest first", body = Vec<Session>)
    ),
    tag = "sessions"
)]
pub async fn list_sessions(State(db): State<Database>) -> Result<Response, WebError> {
    let sessions = services::list_sessions(db.store()).await?;

    Ok(Json(sessions).into_response())
}

#[utoipa::path(
    get,
    path = "/api/sessions/player/{player_id}",
    params(
        ("player_id" = String, Path, description = "Player id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Sessions naming the player, newest first", body = Vec<Session>),
        (status = 404, description = "Player not found")
    ),
    tag = "sessions"
)]
pub async fn list_player_sessions(
    State(db): State<Database>,
    Path(player_id): Path<String>,
) -> Result<Response, WebError> {
    let sessions = services::list_player_sessions(db.store(), &player_id).await?;

    Ok(Json(sessions).into_response())
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    params(
        ("id" = String, Path, description = "Session id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Session found", body = Session),
        (status = 404, description = "Session not found")
    ),
    tag = "sessions"
)]
pub async fn get_session(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let session = services::get_session(db.store(), &id).await?;

    Ok(Json(session).into_response())
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body = CreateSessionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Session created successfully", body = Session),
        (status = 400, description = "Validation error or unknown player")
    ),
    tag = "sessions"
)]
pub async fn create_session(
    State(db): State<Database>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let session = services::create_session(db.store(), &req).await?;

    Ok((StatusCode::CREATED, Json(session)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/sessions/{id}",
    params(
        ("id" = String, Path, description = "Session id")
    ),
    request_body = UpdateSessionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Session updated successfully", body = Session),
        (status = 400, description = "Validation error, unknown player or nothing to update"),
        (status = 404, description = "Session not found")
    ),
    tag = "sessions"
)]
pub async fn update_session(
    State(db): State<Database>,
    Path(id): Path<String>,
    Json(update_req): Json<UpdateSessionRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_session(db.store(), &id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    params(
        ("id" = String, Path, description = "Session id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Session deleted successfully"),
        (status = 404, description = "Session not found")
    ),
    tag = "sessions"
)]
pub async fn delete_session(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    services::delete_session(db.store(), &id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
