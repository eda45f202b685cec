use axum::{Router, routing::get};

use super::handlers::{create_match, delete_match, get_match, list_matches, update_match};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_matches).post(create_match))
        .route("/:id", get(get_match).put(update_match).delete(delete_match))
}
