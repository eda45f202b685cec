use axum::{
    Router,
    routing::{get, post, put},
};

use super::handlers::{
    delete_participation, list_match_participations, list_player_participations,
    record_participation, update_participation,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(record_participation))
        .route("/match/:match_id", get(list_match_participations))
        .route("/player/:player_id", get(list_player_participations))
        .route("/:id", put(update_participation).delete(delete_participation))
}
