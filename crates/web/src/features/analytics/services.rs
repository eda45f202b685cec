use chrono::NaiveDateTime;
use storage::{
    dto::report::{DashboardAnalytics, DashboardParams},
    error::Result,
    repository::{player::PlayerRepository, session::SessionRepository},
    services::aggregation::{
        LEAST_ACTIVE_PLAYERS, inactive_players, monthly_evolution, player_activity,
        theme_breakdown, trainer_breakdown, within_window,
    },
    store::DocumentStore,
};

/// Club-wide activity over the trailing `params.days` days. The inactivity
/// alert ignores the window and looks at every session.
pub async fn dashboard(
    store: &dyn DocumentStore,
    params: &DashboardParams,
    now: NaiveDateTime,
) -> Result<DashboardAnalytics> {
    let all_sessions = SessionRepository::new(store).list().await?;
    let players = PlayerRepository::new(store).list().await?;

    let sessions = within_window(&all_sessions, now, params.days);
    let activity = player_activity(&players, &sessions);
    let least_active_players = activity.iter().take(LEAST_ACTIVE_PLAYERS).cloned().collect();

    Ok(DashboardAnalytics {
        window_days: params.days,
        monthly_evolution: monthly_evolution(&sessions, now),
        theme_stats: theme_breakdown(&sessions),
        coach_stats: trainer_breakdown(&sessions),
        player_activity: activity,
        least_active_players,
        inactive_players: inactive_players(&players, &all_sessions, now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, seed_player, seed_session, test_now};
    use storage::Database;

    #[tokio::test]
    async fn test_inactivity_alert_uses_all_sessions() {
        let db = Database::in_memory();
        let stale = seed_player(db.store(), "Hugo", "Martin").await;
        let active = seed_player(db.store(), "Lina", "Diallo").await;
        seed_session(db.store(), date(2026, 10, 6), &[&stale.id], &["Tir"], &["Leo"]).await;
        seed_session(db.store(), date(2026, 10, 14), &[&active.id], &["Passes"], &["Nina"]).await;

        let params = DashboardParams { days: 1 };
        let analytics = dashboard(db.store(), &params, test_now()).await.unwrap();

        assert_eq!(analytics.inactive_players, vec!["Hugo Martin".to_string()]);
        assert!(analytics.theme_stats.is_empty());
        assert!(analytics.player_activity.iter().all(|a| a.session_count == 0));
    }

    #[tokio::test]
    async fn test_window_limits_breakdowns() {
        let db = Database::in_memory();
        let lina = seed_player(db.store(), "Lina", "Diallo").await;
        let hugo = seed_player(db.store(), "Hugo", "Martin").await;
        seed_session(db.store(), date(2026, 10, 1), &[&lina.id, &hugo.id], &["Tir"], &["Leo"]).await;
        seed_session(db.store(), date(2026, 10, 12), &[&lina.id], &["Tir", "Passes"], &["Nina"]).await;
        seed_session(db.store(), date(2026, 6, 1), &[&hugo.id], &["Défense"], &["Leo"]).await;

        let analytics = dashboard(db.store(), &DashboardParams::default(), test_now())
            .await
            .unwrap();

        assert_eq!(analytics.window_days, 30);
        assert_eq!(analytics.theme_stats["Tir"], 2);
        assert!(!analytics.theme_stats.contains_key("Défense"));
        assert_eq!(analytics.coach_stats["Leo"], 1);
        assert_eq!(analytics.monthly_evolution.len(), 1);
        assert_eq!(analytics.monthly_evolution[0].month, "2026-10");
        assert_eq!(analytics.monthly_evolution[0].count, 2);
        assert_eq!(analytics.least_active_players[0].name, "Hugo Martin");
        assert_eq!(analytics.least_active_players[0].session_count, 1);
    }

    #[tokio::test]
    async fn test_year_window_covers_every_session() {
        let db = Database::in_memory();
        let lina = seed_player(db.store(), "Lina", "Diallo").await;
        seed_session(db.store(), date(2024, 1, 10), &[&lina.id], &["Tir"], &["Leo"]).await;
        seed_session(db.store(), date(2026, 10, 12), &[&lina.id], &["Tir"], &["Leo"]).await;

        let analytics = dashboard(db.store(), &DashboardParams { days: 365 }, test_now())
            .await
            .unwrap();

        assert_eq!(analytics.theme_stats["Tir"], 2);
        assert_eq!(analytics.player_activity[0].session_count, 2);
        assert_eq!(analytics.monthly_evolution.len(), 1);
    }
}
