use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::DateRange,
        report::{CalendarEntry, CoachReport, PlayerReport},
    },
};

use crate::clock::Clock;
use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/reports/player/{player_id}",
    params(
        ("player_id" = String, Path, description = "Player id"),
        DateRange
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Session breakdowns and match statistics for the player", body = PlayerReport),
        (status = 400, description = "Invalid date range"),
        (status = 404, description = "Player not found")
    ),
    tag = "reports"
)]
pub async fn player_report(
    State(db): State<Database>,
    Path(player_id): Path<String>,
    Query(range): Query<DateRange>,
) -> Result<Response, WebError> {
    range.validate().map_err(WebError::BadRequest)?;

    let report = services::player_report(db.store(), &player_id, &range).await?;

    Ok(Json(report).into_response())
}

#[utoipa::path(
    get,
    path = "/api/reports/coach/{coach_name}",
    params(
        ("coach_name" = String, Path, description = "Trainer name as it appears on sessions"),
        DateRange
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Sessions run by the trainer", body = CoachReport),
        (status = 400, description = "Invalid date range")
    ),
    tag = "reports"
)]
pub async fn coach_report(
    State(db): State<Database>,
    State(clock): State<Arc<dyn Clock>>,
    Path(coach_name): Path<String>,
    Query(range): Query<DateRange>,
) -> Result<Response, WebError> {
    range.validate().map_err(WebError::BadRequest)?;

    let report = services::coach_report(db.store(), &coach_name, &range, clock.now()).await?;

    Ok(Json(report).into_response())
}

#[utoipa::path(
    get,
    path = "/api/calendar",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Every session as a calendar entry", body = Vec<CalendarEntry>)
    ),
    tag = "reports"
)]
pub async fn calendar(State(db): State<Database>) -> Result<Response, WebError> {
    let entries = services::calendar(db.store()).await?;

    Ok(Json(entries).into_response())
}
