use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::coach::{CreateCoachRequest, UpdateCoachRequest},
    models::Coach,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/coaches",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "List all coaches successfully", body = Vec<Coach>)
    ),
    tag = "coaches"
)]
pub async fn list_coaches(State(db): State<Database>) -> Result<Response, WebError> {
    let coaches = services::list_coaches(db.store()).await?;

    Ok(Json(coaches).into_response())
}

#[utoipa::path(
    get,
    path = "/api/coaches/{id}",
    params(
        ("id" = String, Path, description = "Coach id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Coach found", body = Coach),
        (status = 404, description = "Coach not found")
    ),
    tag = "coaches"
)]
pub async fn get_coach(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let coach = services::get_coach(db.store(), &id).await?;

    Ok(Json(coach).into_response())
}

#[utoipa::path(
    post,
    path = "/api/coaches",
    request_body = CreateCoachRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Coach created successfully", body = Coach),
        (status = 400, description = "Validation error")
    ),
    tag = "coaches"
)]
pub async fn create_coach(
    State(db): State<Database>,
    Json(req): Json<CreateCoachRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let coach = services::create_coach(db.store(), &req).await?;

    Ok((StatusCode::CREATED, Json(coach)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/coaches/{id}",
    params(
        ("id" = String, Path, description = "Coach id")
    ),
    request_body = UpdateCoachRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Coach updated successfully", body = Coach),
        (status = 400, description = "Validation error or nothing to update"),
        (status = 404, description = "Coach not found")
    ),
    tag = "coaches"
)]
pub async fn update_coach(
    State(db): State<Database>,
    Path(id): Path<String>,
    Json(update_req): Json<UpdateCoachRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_coach(db.store(), &id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/coaches/{id}",
    params(
        ("id" = String, Path, description = "Coach id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Coach deleted successfully"),
        (status = 404, description = "Coach not found")
    ),
    tag = "coaches"
)]
pub async fn delete_coach(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    services::delete_coach(db.store(), &id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
