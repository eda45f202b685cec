use axum::{
    Router,
    routing::{get, put},
};

use super::handlers::{
    delete_evaluation, evaluate_player, global_average, latest_player_evaluation,
    list_evaluations, list_player_evaluations, player_average, position_average,
    update_evaluation,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_evaluations).post(evaluate_player))
        .route("/player/:player_id", get(list_player_evaluations))
        .route("/player/:player_id/latest", get(latest_player_evaluation))
        .route("/player/:player_id/average", get(player_average))
        .route("/averages/all", get(global_average))
        .route("/averages/position/:position", get(position_average))
        .route("/:id", put(update_evaluation).delete(delete_evaluation))
}
