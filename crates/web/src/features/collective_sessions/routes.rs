use axum::{Router, routing::get};

use super::handlers::{
    create_collective_session, delete_collective_session, get_collective_session,
    list_collective_sessions, replace_collective_session,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_collective_sessions).post(create_collective_session),
        )
        .route(
            "/:id",
            get(get_collective_session)
                .put(replace_collective_session)
                .delete(delete_collective_session),
        )
}
