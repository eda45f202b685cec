use axum::{Router, routing::get};

use super::handlers::{create_player, delete_player, get_player, list_players, update_player};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_players).post(create_player))
        .route(
            "/:id",
            get(get_player).put(update_player).delete(delete_player),
        )
}
