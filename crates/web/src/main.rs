use std::sync::Arc;

use anyhow::Context;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod app;
mod clock;
mod config;
mod error;
mod features;
mod middleware;
mod state;
#[cfg(test)]
mod test_support;

use clock::SystemClock;
use config::Config;
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::players::handlers::list_players,
        features::players::handlers::get_player,
        features::players::handlers::create_player,
        features::players::handlers::update_player,
        features::players::handlers::delete_player,
        features::coaches::handlers::list_coaches,
        features::coaches::handlers::get_coach,
        features::coaches::handlers::create_coach,
        features::coaches::handlers::update_coach,
        features::coaches::handlers::delete_coach,
        features::sessions::handlers::list_sessions,
        features::sessions::handlers::list_player_sessions,
        features::sessions::handlers::get_session,
        features::sessions::handlers::create_session,
        features::sessions::handlers::update_session,
        features::sessions::handlers::delete_session,
        features::collective_sessions::handlers::list_collective_sessions,
        features::collective_sessions::handlers::get_collective_session,
        features::collective_sessions::handlers::create_collective_session,
        features::collective_sessions::handlers::replace_collective_session,
        features::collective_sessions::handlers::delete_collective_session,
        features::attendances::handlers::record_attendance,
        features::attendances::handlers::list_session_attendances,
        features::attendances::handlers::list_player_attendances,
        features::attendances::handlers::attendance_report,
        features::attendances::handlers::update_attendance,
        features::attendances::handlers::delete_attendance,
        features::matches::handlers::list_matches,
        features::matches::handlers::get_match,
        features::matches::handlers::create_match,
        features::matches::handlers::update_match,
        features::matches::handlers::delete_match,
        features::participations::handlers::record_participation,
        features::participations::handlers::list_match_participations,
        features::participations::handlers::list_player_participations,
        features::participations::handlers::update_participation,
        features::participations::handlers::delete_participation,
        features::evaluations::handlers::evaluate_player,
        features::evaluations::handlers::list_evaluations,
        features::evaluations::handlers::list_player_evaluations,
        features::evaluations::handlers::latest_player_evaluation,
        features::evaluations::handlers::player_average,
        features::evaluations::handlers::global_average,
        features::evaluations::handlers::position_average,
        features::evaluations::handlers::update_evaluation,
        features::evaluations::handlers::delete_evaluation,
        features::reports::handlers::player_report,
        features::reports::handlers::coach_report,
        features::reports::handlers::calendar,
        features::analytics::handlers::dashboard,
        features::auth::handlers::me,
        features::auth::handlers::health,
    ),
    components(
        schemas(
            storage::dto::player::CreatePlayerRequest,
            storage::dto::player::UpdatePlayerRequest,
            storage::dto::coach::CreateCoachRequest,
            storage::dto::coach::UpdateCoachRequest,
            storage::dto::session::CreateSessionRequest,
            storage::dto::session::UpdateSessionRequest,
            storage::dto::collective_session::CollectiveSessionRequest,
            storage::dto::attendance::CreateAttendanceRequest,
            storage::dto::attendance::UpdateAttendanceRequest,
            storage::dto::attendance::AttendanceWithPlayer,
            storage::dto::attendance::AttendanceWithSession,
            storage::dto::attendance::StatusCounts,
            storage::dto::attendance::RecentAttendance,
            storage::dto::attendance::AttendanceStatistics,
            storage::dto::attendance::AttendanceReport,
            storage::dto::matches::CreateMatchRequest,
            storage::dto::matches::UpdateMatchRequest,
            storage::dto::participation::CreateParticipationRequest,
            storage::dto::participation::UpdateParticipationRequest,
            storage::dto::participation::ParticipationWithPlayer,
            storage::dto::participation::ParticipationWithMatch,
            storage::dto::evaluation::CreateEvaluationRequest,
            storage::dto::evaluation::UpdateEvaluationRequest,
            storage::dto::evaluation::EvaluationRollup,
            storage::dto::evaluation::PlayerEvaluationAverage,
            storage::dto::evaluation::GlobalEvaluationAverage,
            storage::dto::evaluation::PositionEvaluationAverage,
            storage::dto::report::TeamBreakdown,
            storage::dto::report::MatchStats,
            storage::dto::report::PlayerReport,
            storage::dto::report::CoachReport,
            storage::dto::report::CalendarEntry,
            storage::dto::report::MonthlyCount,
            storage::dto::report::PlayerActivity,
            storage::dto::report::DashboardAnalytics,
            storage::dto::common::DateRange,
            storage::models::Player,
            storage::models::Coach,
            storage::models::Session,
            storage::models::CollectiveSession,
            storage::models::Attendance,
            storage::models::AttendanceStatus,
            storage::models::Match,
            storage::models::Team,
            storage::models::MatchParticipation,
            storage::models::PlayerEvaluation,
            storage::models::EvaluationTheme,
            storage::models::EvaluationAspect,
            storage::models::User,
            storage::models::Role,
        )
    ),
    tags(
        (name = "players", description = "Player roster"),
        (name = "coaches", description = "Coaching staff"),
        (name = "sessions", description = "Individual training sessions"),
        (name = "collective-sessions", description = "Team sessions and their attendance"),
        (name = "attendances", description = "Attendance records and rates"),
        (name = "matches", description = "Matches"),
        (name = "match-participations", description = "Player participation in matches"),
        (name = "evaluations", description = "Scored player evaluations"),
        (name = "reports", description = "Player and coach reports, calendar"),
        (name = "analytics", description = "Club dashboard"),
        (name = "auth", description = "Caller identity and health"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting club API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let db = match &config.database_url {
        Some(url) => {
            tracing::info!(
                "Connecting to database at: {}",
                url.split('@').next_back().unwrap_or("unknown")
            );
            let db = Database::connect(url)
                .await
                .context("Failed to initialize database")?;
            tracing::info!("Database connection established, migrations applied");
            db
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, data is kept in memory only");
            Database::in_memory()
        }
    };

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys)
        .map_err(anyhow::Error::msg)
        .context("Invalid API_KEYS")?;
    if api_keys.is_empty() {
        tracing::warn!("No API keys configured, every /api request will be rejected");
    }

    let users = features::auth::services::bootstrap_users(db.store(), &api_keys)
        .await
        .context("Failed to bootstrap users")?;
    tracing::info!("{} user(s) bootstrapped from API keys", users);

    let state = AppState::new(db, Arc::new(SystemClock));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = app::router(state, api_keys)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
