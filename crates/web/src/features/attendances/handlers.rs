use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        attendance::{
            AttendanceReport, AttendanceWithPlayer, AttendanceWithSession,
            CreateAttendanceRequest, UpdateAttendanceRequest,
        },
        common::DateRange,
    },
    models::Attendance,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

fn check_range(range: &DateRange) -> Result<(), WebError> {
    range.validate().map_err(WebError::BadRequest)
}

#[utoipa::path(
    post,
    path = "/api/attendances",
    request_body = CreateAttendanceRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Attendance recorded; an earlier record for the same session and player is replaced", body = Attendance),
        (status = 400, description = "Validation error or unknown session/player")
    ),
    tag = "attendances"
)]
pub async fn record_attendance(
    State(db): State<Database>,
    Json(req): Json<CreateAttendanceRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let attendance = services::record_attendance(db.store(), &req).await?;

    Ok(Json(attendance).into_response())
}

#[utoipa::path(
    get,
    path = "/api/attendances/session/{session_id}",
    params(
        ("session_id" = String, Path, description = "Collective session id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Attendances with their players", body = Vec<AttendanceWithPlayer>)
    ),
    tag = "attendances"
)]
pub async fn list_session_attendances(
    State(db): State<Database>,
    Path(session_id): Path<String>,
) -> Result<Response, WebError> {
    let attendances = services::list_session_attendances(db.store(), &session_id).await?;

    Ok(Json(attendances).into_response())
}

#[utoipa::path(
    get,
    path = "/api/attendances/player/{player_id}",
    params(
        ("player_id" = String, Path, description = "Player id"),
        DateRange
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Attendances with their sessions, newest first", body = Vec<AttendanceWithSession>),
        (status = 400, description = "Invalid date range")
    ),
    tag = "attendances"
)]
pub async fn list_player_attendances(
    State(db): State<Database>,
    Path(player_id): Path<String>,
    Query(range): Query<DateRange>,
) -> Result<Response, WebError> {
    check_range(&range)?;

    let attendances = services::list_player_attendances(db.store(), &player_id, &range).await?;

    Ok(Json(attendances).into_response())
}

#[utoipa::path(
    get,
    path = "/api/attendances/reports/player/{player_id}",
    params(
        ("player_id" = String, Path, description = "Player id"),
        DateRange
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Attendance statistics for the player", body = AttendanceReport),
        (status = 400, description = "Invalid date range"),
        (status = 404, description = "Player not found")
    ),
    tag = "attendances"
)]
pub async fn attendance_report(
    State(db): State<Database>,
    Path(player_id): Path<String>,
    Query(range): Query<DateRange>,
) -> Result<Response, WebError> {
    check_range(&range)?;

    let report = services::attendance_report(db.store(), &player_id, &range).await?;

    Ok(Json(report).into_response())
}

#[utoipa::path(
    put,
    path = "/api/attendances/{id}",
    params(
        ("id" = String, Path, description = "Attendance id")
    ),
    request_body = UpdateAttendanceRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Attendance updated", body = Attendance),
        (status = 400, description = "Nothing to update"),
        (status = 404, description = "Attendance not found")
    ),
    tag = "attendances"
)]
pub async fn update_attendance(
    State(db): State<Database>,
    Path(id): Path<String>,
    Json(update_req): Json<UpdateAttendanceRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let attendance = services::update_attendance(db.store(), &id, &update_req).await?;

    Ok(Json(attendance).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/attendances/{id}",
    params(
        ("id" = String, Path, description = "Attendance id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Attendance deleted"),
        (status = 404, description = "Attendance not found")
    ),
    tag = "attendances"
)]
pub async fn delete_attendance(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    services::delete_attendance(db.store(), &id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
