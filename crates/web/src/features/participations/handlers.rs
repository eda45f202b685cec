use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::participation::{
        CreateParticipationRequest, ParticipationWithMatch, ParticipationWithPlayer,
        UpdateParticipationRequest,
    },
    models::MatchParticipation,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/match-participations",
    request_body = CreateParticipationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participation recorded; an earlier record for the same match and player is replaced", body = MatchParticipation),
        (status = 400, description = "Validation error or unknown match/player")
    ),
    tag = "match-participations"
)]
pub async fn record_participation(
    State(db): State<Database>,
    Json(req): Json<CreateParticipationRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let participation = services::record_participation(db.store(), &req).await?;

    Ok(Json(participation).into_response())
}

#[utoipa::path(
    get,
    path = "/api/match-participations/match/{match_id}",
    params(
        ("match_id" = String, Path, description = "Match id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participations with their players", body = Vec<ParticipationWithPlayer>)
    ),
    tag = "match-participations"
)]
pub async fn list_match_participations(
    State(db): State<Database>,
    Path(match_id): Path<String>,
) -> Result<Response, WebError> {
    let participations = services::list_match_participations(db.store(), &match_id).await?;

    Ok(Json(participations).into_response())
}

#[utoipa::path(
    get,
    path = "/api/match-participations/player/{player_id}",
    params(
        ("player_id" = String, Path, description = "Player id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participations with their matches", body = Vec<ParticipationWithMatch>)
    ),
    tag = "match-participations"
)]
pub async fn list_player_participations(
    State(db): State<Database>,
    Path(player_id): Path<String>,
) -> Result<Response, WebError> {
    let participations = services::list_player_participations(db.store(), &player_id).await?;

    Ok(Json(participations).into_response())
}

#[utoipa::path(
    put,
    path = "/api/match-participations/{id}",
    params(
        ("id" = String, Path, description = "Participation id")
    ),
    request_body = UpdateParticipationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participation updated", body = MatchParticipation),
        (status = 400, description = "Nothing to update"),
        (status = 404, description = "Participation not found")
    ),
    tag = "match-participations"
)]
pub async fn update_participation(
    State(db): State<Database>,
    Path(id): Path<String>,
    Json(update_req): Json<UpdateParticipationRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let participation = services::update_participation(db.store(), &id, &update_req).await?;

    Ok(Json(participation).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/match-participations/{id}",
    params(
        ("id" = String, Path, description = "Participation id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Participation deleted"),
        (status = 404, description = "Participation not found")
    ),
    tag = "match-participations"
)]
pub async fn delete_participation(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    services::delete_participation(db.store(), &id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
