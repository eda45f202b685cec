use axum::{Router, routing::get};

use super::handlers::{
    create_session, delete_session, get_session, list_player_sessions, list_sessions,
    update_session,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route("/player/:player_id", get(list_player_sessions))
        .route(
            "/:id",
            get(get_session).put(update_session).delete(delete_session),
        )
}
