use axum::{Router, routing::get};

use super::handlers::{calendar, coach_report, player_report};
use crate::state::AppState;

/// Mounted at the API root: the calendar lives beside `/reports`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/player/:player_id", get(player_report))
        .route("/reports/coach/:coach_name", get(coach_report))
        .route("/calendar", get(calendar))
}
