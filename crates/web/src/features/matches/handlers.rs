use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::matches::{CreateMatchRequest, MatchFilter, UpdateMatchRequest},
    models::Match,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/matches",
    params(MatchFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Matches, newest first", body = Vec<Match>),
        (status = 400, description = "Invalid month or year")
    ),
    tag = "matches"
)]
pub async fn list_matches(
    State(db): State<Database>,
    Query(filter): Query<MatchFilter>,
) -> Result<Response, WebError> {
    let matches = services::list_matches(db.store(), &filter).await?;

    Ok(Json(matches).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches/{id}",
    params(
        ("id" = String, Path, description = "Match id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match found", body = Match),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn get_match(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let game = services::get_match(db.store(), &id).await?;

    Ok(Json(game).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches",
    request_body = CreateMatchRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Match created successfully", body = Match),
        (status = 400, description = "Validation error")
    ),
    tag = "matches"
)]
pub async fn create_match(
    State(db): State<Database>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let game = services::create_match(db.store(), &req).await?;

    Ok((StatusCode::CREATED, Json(game)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/matches/{id}",
    params(
        ("id" = String, Path, description = "Match id")
    ),
    request_body = UpdateMatchRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match updated successfully", body = Match),
        (status = 400, description = "Validation error or nothing to update"),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn update_match(
    State(db): State<Database>,
    Path(id): Path<String>,
    Json(update_req): Json<UpdateMatchRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let game = services::update_match(db.store(), &id, &update_req).await?;

    Ok(Json(game).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/matches/{id}",
    params(
        ("id" = String, Path, description = "Match id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Match and its participations deleted"),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn delete_match(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    services::delete_match(db.store(), &id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
