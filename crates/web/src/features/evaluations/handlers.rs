use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::evaluation::{
        CreateEvaluationRequest, GlobalEvaluationAverage, PlayerEvaluationAverage,
        PositionEvaluationAverage, UpdateEvaluationRequest,
    },
    error::StorageError,
    models::PlayerEvaluation,
};
use validator::Validate;

use crate::clock::Clock;
use crate::error::WebError;
use crate::middleware::auth::CallerIdentity;

use super::services;

#[utoipa::path(
    post,
    path = "/api/evaluations",
    request_body = CreateEvaluationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Evaluation scored and stored; an earlier evaluation of the same type is replaced", body = PlayerEvaluation),
        (status = 400, description = "Validation error or unknown player")
    ),
    tag = "evaluations"
)]
pub async fn evaluate_player(
    State(db): State<Database>,
    State(clock): State<Arc<dyn Clock>>,
    Extension(caller): Extension<CallerIdentity>,
    Json(req): Json<CreateEvaluationRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let evaluation =
        services::evaluate_player(db.store(), &caller.user_id, clock.now(), &req).await?;

    Ok(Json(evaluation).into_response())
}

#[utoipa::path(
    get,
    path = "/api/evaluations",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Every evaluation, newest first", body = Vec<PlayerEvaluation>)
    ),
    tag = "evaluations"
)]
pub async fn list_evaluations(State(db): State<Database>) -> Result<Response, WebError> {
    let evaluations = services::list_evaluations(db.store()).await?;

    Ok(Json(evaluations).into_response())
}

#[utoipa::path(
    get,
    path = "/api/evaluations/player/{player_id}",
    params(
        ("player_id" = String, Path, description = "Player id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The player's evaluations, newest first", body = Vec<PlayerEvaluation>)
    ),
    tag = "evaluations"
)]
pub async fn list_player_evaluations(
    State(db): State<Database>,
    Path(player_id): Path<String>,
) -> Result<Response, WebError> {
    let evaluations = services::list_player_evaluations(db.store(), &player_id).await?;

    Ok(Json(evaluations).into_response())
}

#[utoipa::path(
    get,
    path = "/api/evaluations/player/{player_id}/latest",
    params(
        ("player_id" = String, Path, description = "Player id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The player's most recent evaluation", body = PlayerEvaluation),
        (status = 404, description = "No evaluation found for this player")
    ),
    tag = "evaluations"
)]
pub async fn latest_player_evaluation(
    State(db): State<Database>,
    Path(player_id): Path<String>,
) -> Result<Response, WebError> {
    let evaluation = services::latest_player_evaluation(db.store(), &player_id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => WebError::not_found("Evaluation"),
            other => other.into(),
        })?;

    Ok(Json(evaluation).into_response())
}

#[utoipa::path(
    get,
    path = "/api/evaluations/player/{player_id}/average",
    params(
        ("player_id" = String, Path, description = "Player id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Theme averages over the player's evaluations", body = PlayerEvaluationAverage),
        (status = 404, description = "No evaluations found for this player")
    ),
    tag = "evaluations"
)]
pub async fn player_average(
    State(db): State<Database>,
    Path(player_id): Path<String>,
) -> Result<Response, WebError> {
    let average = services::player_average(db.store(), &player_id)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => WebError::not_found("Evaluation"),
            other => other.into(),
        })?;

    Ok(Json(average).into_response())
}

#[utoipa::path(
    get,
    path = "/api/evaluations/averages/all",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Theme averages over every evaluation", body = GlobalEvaluationAverage)
    ),
    tag = "evaluations"
)]
pub async fn global_average(State(db): State<Database>) -> Result<Response, WebError> {
    let average = services::global_average(db.store()).await?;

    Ok(Json(average).into_response())
}

#[utoipa::path(
    get,
    path = "/api/evaluations/averages/position/{position}",
    params(
        ("position" = String, Path, description = "Playing position")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Theme averages over the players of a position", body = PositionEvaluationAverage)
    ),
    tag = "evaluations"
)]
pub async fn position_average(
    State(db): State<Database>,
    Path(position): Path<String>,
) -> Result<Response, WebError> {
    let average = services::position_average(db.store(), &position).await?;

    Ok(Json(average).into_response())
}

#[utoipa::path(
    put,
    path = "/api/evaluations/{id}",
    params(
        ("id" = String, Path, description = "Evaluation id")
    ),
    request_body = UpdateEvaluationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Evaluation re-scored", body = PlayerEvaluation),
        (status = 400, description = "Validation error or nothing to update"),
        (status = 404, description = "Evaluation not found")
    ),
    tag = "evaluations"
)]
pub async fn update_evaluation(
    State(db): State<Database>,
    Path(id): Path<String>,
    Json(update_req): Json<UpdateEvaluationRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let evaluation = services::update_evaluation(db.store(), &id, &update_req).await?;

    Ok(Json(evaluation).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/evaluations/{id}",
    params(
        ("id" = String, Path, description = "Evaluation id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Evaluation deleted"),
        (status = 404, description = "Evaluation not found")
    ),
    tag = "evaluations"
)]
pub async fn delete_evaluation(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    services::delete_evaluation(db.store(), &id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
