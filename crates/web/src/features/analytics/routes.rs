use axum::{Router, routing::get};

use super::handlers::dashboard;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}
