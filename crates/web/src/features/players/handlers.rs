use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::player::{CreatePlayerRequest, UpdatePlayerRequest},
    models::Player,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/players",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "List all players successfully", body = Vec<Player>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "players"
)]
pub async fn list_players(State(db): State<Database>) -> Result<Response, WebError> {
    let players = services::list_players(db.store()).await?;

    Ok(Json(players).into_response())
}

#[utoipa::path(
    get,
    path = "/api/players/{id}",
    params(
        ("id" = String, Path, description = "Player id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Player found", body = Player),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn get_player(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let player = services::get_player(db.store(), &id).await?;

    Ok(Json(player).into_response())
}

#[utoipa::path(
    post,
    path = "/api/players",
    request_body = CreatePlayerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Player created successfully", body = Player),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "players"
)]
pub async fn create_player(
    State(db): State<Database>,
    Json(req): Json<CreatePlayerRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let player = services::create_player(db.store(), &req).await?;

    Ok((StatusCode::CREATED, Json(player)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/players/{id}",
    params(
        ("id" = String, Path, description = "Player id")
    ),
    request_body = UpdatePlayerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Player updated successfully", body = Player),
        (status = 400, description = "Validation error or nothing to update"),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn update_player(
    State(db): State<Database>,
    Path(id): Path<String>,
    Json(update_req): Json<UpdatePlayerRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_player(db.store(), &id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/players/{id}",
    params(
        ("id" = String, Path, description = "Player id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Player and their sessions deleted"),
        (status = 404, description = "Player not found")
    ),
    tag = "players"
)]
pub async fn delete_player(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    services::delete_player(db.store(), &id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
