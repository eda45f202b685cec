use axum::{Router, routing::get};

use super::handlers::{create_coach, delete_coach, get_coach, list_coaches, update_coach};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_coaches).post(create_coach))
        .route("/:id", get(get_coach).put(update_coach).delete(delete_coach))
}
