use axum::{
    Router,
    routing::{get, post, put},
};

use super::handlers::{
    attendance_report, delete_attendance, list_player_attendances, list_session_attendances,
    record_attendance, update_attendance,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(record_attendance))
        .route("/session/:session_id", get(list_session_attendances))
        .route("/player/:player_id", get(list_player_attendances))
        .route("/reports/player/:player_id", get(attendance_report))
        .route("/:id", put(update_attendance).delete(delete_attendance))
}
