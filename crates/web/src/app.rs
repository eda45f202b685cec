use axum::{Router, middleware, routing::get};

use crate::features::{
    analytics, attendances, auth, coaches, collective_sessions, evaluations, matches,
    participations, players, reports, sessions,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

/// Every `/api` route sits behind the bearer key check; `/health` does not.
pub fn router(state: AppState, api_keys: ApiKeys) -> Router {
    let api = Router::new()
        .nest("/players", players::routes::routes())
        .nest("/coaches", coaches::routes::routes())
        .nest("/sessions", sessions::routes::routes())
        .nest(
            "/collective-sessions",
            collective_sessions::routes::routes(),
        )
        .nest("/attendances", attendances::routes::routes())
        .nest("/matches", matches::routes::routes())
        .nest("/match-participations", participations::routes::routes())
        .nest("/evaluations", evaluations::routes::routes())
        .nest("/analytics", analytics::routes::routes())
        .nest("/auth", auth::routes::routes())
        .merge(reports::routes::routes())
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .nest("/api", api)
        .route("/health", get(auth::handlers::health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_player, test_state};
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use storage::repository::user::UserRepository;
    use tower::ServiceExt;

    const KEY: &str = "secret";

    fn api_keys() -> ApiKeys {
        ApiKeys::from_comma_separated("secret:coach-1:coach").unwrap()
    }

    fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", KEY));

        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_api_requires_a_known_key() {
        let app = router(test_state(), api_keys());

        let missing = app
            .clone()
            .oneshot(Request::get("/api/players").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let wrong = app
            .oneshot(
                Request::get("/api/players")
                    .header(header::AUTHORIZATION, "Bearer nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(wrong).await["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_known_key_lists_players() {
        let state = test_state();
        seed_player(state.db.store(), "Lina", "Diallo").await;
        let app = router(state, api_keys());

        let response = app
            .oneshot(request(Method::GET, "/api/players", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let players = json_body(response).await;
        assert_eq!(players.as_array().unwrap().len(), 1);
        assert_eq!(players[0]["last_name"], "Diallo");
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = router(test_state(), api_keys());

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_player_validates_payload() {
        let app = router(test_state(), api_keys());

        let created = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/api/players",
                Some(json!({
                    "first_name": "Lina",
                    "last_name": "Diallo",
                    "date_of_birth": "2008-05-17",
                    "position": "Meneur"
                })),
            ))
            .await
            .unwrap();
        let invalid = app
            .oneshot(request(
                Method::POST,
                "/api/players",
                Some(json!({
                    "first_name": "",
                    "last_name": "Diallo",
                    "date_of_birth": "2008-05-17",
                    "position": "Meneur"
                })),
            ))
            .await
            .unwrap();

        assert_eq!(created.status(), StatusCode::CREATED);
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(invalid).await["error"], "Validation failed");
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let state = test_state();
        let player = seed_player(state.db.store(), "Lina", "Diallo").await;
        let app = router(state, api_keys());

        let response = app
            .oneshot(request(
                Method::PUT,
                &format!("/api/players/{}", player.id),
                Some(json!({})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "No data to update");
    }

    #[tokio::test]
    async fn test_missing_player_is_not_found() {
        let app = router(test_state(), api_keys());

        let response = app
            .oneshot(request(Method::GET, "/api/players/unknown", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_evaluation_is_scored_and_replaced() {
        let state = test_state();
        let player = seed_player(state.db.store(), "Lina", "Diallo").await;
        let app = router(state, api_keys());
        let evaluation = |scores: [i32; 2]| {
            json!({
                "player_id": player.id,
                "themes": [{
                    "name": "ADRESSE",
                    "aspects": [
                        {"name": "Tir en course", "score": scores[0]},
                        {"name": "Lancer franc", "score": scores[1]}
                    ]
                }]
            })
        };

        let first = app
            .clone()
            .oneshot(request(Method::POST, "/api/evaluations", Some(evaluation([4, 5]))))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let first = json_body(first).await;
        assert_eq!(first["overall_average"], 4.5);
        assert_eq!(first["evaluator_id"], "coach-1");
        assert_eq!(first["evaluation_type"], "initial");

        let second = app
            .clone()
            .oneshot(request(Method::POST, "/api/evaluations", Some(evaluation([2, 2]))))
            .await
            .unwrap();
        let second = json_body(second).await;
        assert_eq!(second["id"], first["id"]);
        assert_eq!(second["overall_average"], 2.0);

        let listed = app
            .oneshot(request(Method::GET, "/api/evaluations", None))
            .await
            .unwrap();
        assert_eq!(json_body(listed).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_evaluation_of_unknown_player_is_rejected() {
        let app = router(test_state(), api_keys());

        let response = app
            .oneshot(request(
                Method::POST,
                "/api/evaluations",
                Some(json!({"player_id": "ghost", "themes": []})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_me_returns_caller() {
        let state = test_state();
        let app = router(state.clone(), api_keys());

        let before = app
            .clone()
            .oneshot(request(Method::GET, "/api/auth/me", None))
            .await
            .unwrap();
        assert_eq!(before.status(), StatusCode::NOT_FOUND);

        UserRepository::new(state.db.store())
            .ensure("coach-1", storage::models::Role::Coach)
            .await
            .unwrap();
        let after = app
            .oneshot(request(Method::GET, "/api/auth/me", None))
            .await
            .unwrap();

        assert_eq!(after.status(), StatusCode::OK);
        let user = json_body(after).await;
        assert_eq!(user["id"], "coach-1");
        assert_eq!(user["role"], "coach");
    }

    #[tokio::test]
    async fn test_dashboard_reads_window_from_query() {
        let app = router(test_state(), api_keys());

        let response = app
            .oneshot(request(Method::GET, "/api/analytics/dashboard?days=7", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["window_days"], 7);
    }
}
