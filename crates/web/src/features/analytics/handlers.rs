use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::report::{DashboardAnalytics, DashboardParams},
};

use crate::clock::Clock;
use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/analytics/dashboard",
    params(DashboardParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Club activity over the trailing window", body = DashboardAnalytics)
    ),
    tag = "analytics"
)]
pub async fn dashboard(
    State(db): State<Database>,
    State(clock): State<Arc<dyn Clock>>,
    Query(params): Query<DashboardParams>,
) -> Result<Response, WebError> {
    let analytics = services::dashboard(db.store(), &params, clock.now()).await?;

    Ok(Json(analytics).into_response())
}
