use chrono::NaiveDateTime;
use storage::{
    dto::{
        common::DateRange,
        report::{CalendarEntry, CoachReport, PlayerReport},
    },
    error::Result,
    models::Coach,
    repository::{coach::CoachRepository, player::PlayerRepository, session::SessionRepository},
    services::aggregation::{
        self, RECENT_SESSIONS, filter_by_range, player_breakdown, player_names, recent_sessions,
        theme_breakdown, trainer_breakdown,
    },
    store::DocumentStore,
};

use crate::features::participations::services::player_participations;

/// Label for session players missing from the player collection.
const UNKNOWN_PLAYER: &str = "Unknown player";

/// Session and match activity of one player. Sessions are limited to
/// `range`; match statistics always cover the full history.
pub async fn player_report(
    store: &dyn DocumentStore,
    player_id: &str,
    range: &DateRange,
) -> Result<PlayerReport> {
    let player = PlayerRepository::new(store).find_by_id(player_id).await?;

    let sessions = SessionRepository::new(store)
        .list_for_player(player_id)
        .await?;
    let sessions = filter_by_range(sessions, range);

    let participations = player_participations(store, player_id).await?;

    Ok(PlayerReport {
        player,
        total_sessions: sessions.len(),
        content_breakdown: theme_breakdown(&sessions),
        trainer_breakdown: trainer_breakdown(&sessions),
        recent_sessions: recent_sessions(&sessions, RECENT_SESSIONS),
        match_stats: aggregation::match_statistics(&participations),
    })
}

/// Sessions run by a trainer. `name` is matched against the trainer labels
/// of each session as given; the coach record is looked up by first name,
/// last name or full name and synthesized when none matches.
pub async fn coach_report(
    store: &dyn DocumentStore,
    name: &str,
    range: &DateRange,
    now: NaiveDateTime,
) -> Result<CoachReport> {
    let coach = CoachRepository::new(store)
        .find_by_name(name)
        .await?
        .unwrap_or_else(|| Coach::virtual_coach(name, now));

    let sessions: Vec<_> = SessionRepository::new(store)
        .list()
        .await?
        .into_iter()
        .filter(|session| session.trainers.iter().any(|trainer| trainer == name))
        .collect();
    let sessions = filter_by_range(sessions, range);

    let players = PlayerRepository::new(store).list().await?;
    let names = player_names(&players);

    Ok(CoachReport {
        coach,
        total_sessions: sessions.len(),
        theme_breakdown: theme_breakdown(&sessions),
        player_breakdown: player_breakdown(&sessions, &names, UNKNOWN_PLAYER),
        recent_sessions: recent_sessions(&sessions, RECENT_SESSIONS),
    })
}

/// Every session as a calendar entry
pub async fn calendar(store: &dyn DocumentStore) -> Result<Vec<CalendarEntry>> {
    let sessions = SessionRepository::new(store).list().await?;
    let players = PlayerRepository::new(store).list().await?;

    Ok(aggregation::calendar_entries(
        &sessions,
        &player_names(&players),
        UNKNOWN_PLAYER,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, seed_player, seed_session, test_now};
    use serde_json::{Value, json};
    use storage::{
        Database,
        dto::{coach::CreateCoachRequest, matches::CreateMatchRequest, participation::CreateParticipationRequest},
        error::StorageError,
        models::Team,
        repository::{matches::MatchRepository, participation::ParticipationRepository},
        store::{Collection, Document},
    };

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[tokio::test]
    async fn test_player_report_filters_sessions_by_range() {
        let db = Database::in_memory();
        let lina = seed_player(db.store(), "Lina", "Diallo").await;
        seed_session(db.store(), date(2026, 8, 30), &[&lina.id], &["Tir"], &["Leo"]).await;
        seed_session(db.store(), date(2026, 9, 5), &[&lina.id], &["Tir", "Défense"], &["Leo"]).await;
        seed_session(db.store(), date(2026, 9, 12), &[&lina.id], &["Passes"], &["Nina"]).await;

        let range = DateRange::new(Some(date(2026, 9, 1)), Some(date(2026, 9, 30)));
        let report = player_report(db.store(), &lina.id, &range).await.unwrap();

        assert_eq!(report.total_sessions, 2);
        assert_eq!(report.content_breakdown["Tir"], 1);
        assert_eq!(report.content_breakdown["Passes"], 1);
        assert_eq!(report.trainer_breakdown["Leo"], 1);
        assert_eq!(report.recent_sessions[0].session_date, "2026-09-12");
    }

    #[tokio::test]
    async fn test_player_report_includes_legacy_sessions() {
        let db = Database::in_memory();
        let lina = seed_player(db.store(), "Lina", "Diallo").await;
        db.store()
            .insert_one(
                Collection::Sessions,
                doc(json!({
                    "id": "legacy",
                    "player_id": lina.id,
                    "session_date": "2026-09-03",
                    "content": "Shooting",
                    "trainer": "Leo",
                    "results": "Good rhythm"
                })),
            )
            .await
            .unwrap();

        let report = player_report(db.store(), &lina.id, &DateRange::default())
            .await
            .unwrap();

        assert_eq!(report.total_sessions, 1);
        assert_eq!(report.content_breakdown["Shooting"], 1);
        assert_eq!(report.trainer_breakdown["Leo"], 1);
        assert_eq!(report.recent_sessions[0].player_ids, vec![lina.id.clone()]);
        assert_eq!(report.recent_sessions[0].content_details, "Good rhythm");
    }

    #[tokio::test]
    async fn test_player_report_match_stats_cover_full_history() {
        let db = Database::in_memory();
        let lina = seed_player(db.store(), "Lina", "Diallo").await;
        let matches = MatchRepository::new(db.store());
        let participations = ParticipationRepository::new(db.store());

        for (team, day, minutes) in [(Team::U18, 1, 20), (Team::U21, 8, 30), (Team::U18, 15, 0)] {
            let game = matches
                .create(&CreateMatchRequest {
                    team,
                    opponent: "Pau".into(),
                    match_date: date(2025, 3, day),
                    match_time: "15:00".into(),
                    location: "Gymnase".into(),
                    is_home: true,
                    competition: None,
                    final_score_us: None,
                    final_score_opponent: None,
                    coach: None,
                    notes: None,
                })
                .await
                .unwrap();
            participations
                .upsert(&CreateParticipationRequest {
                    match_id: game.id,
                    player_id: lina.id.clone(),
                    is_present: true,
                    is_starter: minutes > 20,
                    play_time: Some(minutes),
                    notes: None,
                })
                .await
                .unwrap();
        }

        let range = DateRange::new(Some(date(2026, 1, 1)), None);
        let report = player_report(db.store(), &lina.id, &range).await.unwrap();
        let stats = &report.match_stats;

        assert_eq!(stats.total_matches, 3);
        assert_eq!(stats.matches_played, 3);
        assert_eq!(stats.matches_started, 1);
        assert_eq!(stats.total_play_time, 50);
        assert_eq!(stats.average_play_time, 25.0);
        assert_eq!(stats.average_play_time_u18, 20.0);
        assert_eq!(stats.average_play_time_u21, 30.0);
        assert_eq!(stats.team_breakdown["U18"].total, 2);
        assert_eq!(stats.recent_matches[0].match_.match_date, date(2025, 3, 15));
    }

    #[tokio::test]
    async fn test_player_report_for_unknown_player() {
        let db = Database::in_memory();

        let result = player_report(db.store(), "ghost", &DateRange::default()).await;

        assert!(matches!(result, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn test_coach_report_resolves_full_name() {
        let db = Database::in_memory();
        CoachRepository::new(db.store())
            .create(&CreateCoachRequest {
                first_name: "Leo".into(),
                last_name: "Garnier".into(),
                photo: None,
            })
            .await
            .unwrap();
        let lina = seed_player(db.store(), "Lina", "Diallo").await;
        seed_session(db.store(), date(2026, 9, 5), &[&lina.id, "ghost"], &["Tir"], &["Leo Garnier"]).await;
        seed_session(db.store(), date(2026, 9, 6), &[&lina.id], &["Tir"], &["Leo"]).await;

        let report = coach_report(db.store(), "Leo Garnier", &DateRange::default(), test_now())
            .await
            .unwrap();

        assert_eq!(report.coach.last_name, "Garnier");
        assert_eq!(report.total_sessions, 1);
        assert_eq!(report.player_breakdown["Lina Diallo"], 1);
        assert_eq!(report.player_breakdown[UNKNOWN_PLAYER], 1);
    }

    #[tokio::test]
    async fn test_coach_report_synthesizes_unknown_coach() {
        let db = Database::in_memory();
        seed_session(db.store(), date(2026, 9, 5), &[], &["Physique"], &["Guest"]).await;

        let report = coach_report(db.store(), "Guest", &DateRange::default(), test_now())
            .await
            .unwrap();

        assert_eq!(report.coach.id, Coach::VIRTUAL_ID);
        assert_eq!(report.coach.first_name, "Guest");
        assert_eq!(report.theme_breakdown["Physique"], 1);
    }

    #[tokio::test]
    async fn test_calendar_titles() {
        let db = Database::in_memory();
        let lina = seed_player(db.store(), "Lina", "Diallo").await;
        seed_session(db.store(), date(2026, 9, 5), &[&lina.id], &["Tir", "Passes"], &["Leo"]).await;

        let entries = calendar(db.store()).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Lina Diallo - Tir, Passes");
    }
}
