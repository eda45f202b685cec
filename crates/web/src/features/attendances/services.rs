use std::collections::HashMap;

use storage::{
    dto::{
        attendance::{
            AttendanceReport, AttendanceWithPlayer, AttendanceWithSession,
            CreateAttendanceRequest, UpdateAttendanceRequest,
        },
        common::DateRange,
    },
    error::{Result, StorageError},
    models::{Attendance, CollectiveSession},
    repository::{
        attendance::AttendanceRepository, collective_session::CollectiveSessionRepository,
        player::PlayerRepository,
    },
    services::aggregation,
    store::DocumentStore,
};

/// Record (or re-record) a player's attendance at a collective session
pub async fn record_attendance(
    store: &dyn DocumentStore,
    request: &CreateAttendanceRequest,
) -> Result<Attendance> {
    if !CollectiveSessionRepository::new(store)
        .exists(&request.collective_session_id)
        .await?
    {
        return Err(StorageError::validation(format!(
            "Collective session {} not found",
            request.collective_session_id
        )));
    }
    if !PlayerRepository::new(store).exists(&request.player_id).await? {
        return Err(StorageError::validation(format!(
            "Player {} not found",
            request.player_id
        )));
    }

    let attendance = AttendanceRepository::new(store).upsert(request).await?;
    tracing::debug!(
        collective_session_id = %attendance.collective_session_id,
        player_id = %attendance.player_id,
        "Recorded attendance"
    );
    Ok(attendance)
}

/// Attendances of a collective session with their players. Records whose
/// player no longer exists are left out.
pub async fn list_session_attendances(
    store: &dyn DocumentStore,
    collective_session_id: &str,
) -> Result<Vec<AttendanceWithPlayer>> {
    let attendances = AttendanceRepository::new(store)
        .list_for_session(collective_session_id)
        .await?;

    let players: HashMap<String, _> = PlayerRepository::new(store)
        .list()
        .await?
        .into_iter()
        .map(|player| (player.id.clone(), player))
        .collect();

    Ok(attendances
        .into_iter()
        .filter_map(|attendance| {
            let player = players.get(&attendance.player_id)?.clone();
            Some(AttendanceWithPlayer { attendance, player })
        })
        .collect())
}

/// A player's attendances joined to their collective sessions, restricted
/// to `range`. Attendances of deleted sessions are left out.
async fn joined_attendances(
    store: &dyn DocumentStore,
    player_id: &str,
    range: &DateRange,
) -> Result<Vec<(Attendance, CollectiveSession)>> {
    let attendances = AttendanceRepository::new(store)
        .list_for_player(player_id)
        .await?;

    let session_ids: Vec<String> = attendances
        .iter()
        .map(|a| a.collective_session_id.clone())
        .collect();
    let sessions: HashMap<String, CollectiveSession> = CollectiveSessionRepository::new(store)
        .list_by_ids(&session_ids)
        .await?
        .into_iter()
        .map(|session| (session.id.clone(), session))
        .collect();

    Ok(attendances
        .into_iter()
        .filter_map(|attendance| {
            let session = sessions.get(&attendance.collective_session_id)?.clone();
            range
                .admits(session.date())
                .then_some((attendance, session))
        })
        .collect())
}

/// A player's attendances with their sessions, newest session first
pub async fn list_player_attendances(
    store: &dyn DocumentStore,
    player_id: &str,
    range: &DateRange,
) -> Result<Vec<AttendanceWithSession>> {
    let mut joined = joined_attendances(store, player_id, range).await?;
    joined.sort_by(|(_, a), (_, b)| b.date().cmp(&a.date()));

    Ok(joined
        .into_iter()
        .map(|(attendance, session)| AttendanceWithSession {
            attendance,
            session,
        })
        .collect())
}

pub async fn update_attendance(
    store: &dyn DocumentStore,
    id: &str,
    request: &UpdateAttendanceRequest,
) -> Result<Attendance> {
    AttendanceRepository::new(store).update(id, request).await
}

pub async fn delete_attendance(store: &dyn DocumentStore, id: &str) -> Result<()> {
    AttendanceRepository::new(store).delete(id).await
}

/// Presence statistics of a player over the collective sessions in `range`
pub async fn attendance_report(
    store: &dyn DocumentStore,
    player_id: &str,
    range: &DateRange,
) -> Result<AttendanceReport> {
    let player = PlayerRepository::new(store).find_by_id(player_id).await?;
    let joined = joined_attendances(store, player_id, range).await?;

    Ok(AttendanceReport {
        player,
        statistics: aggregation::attendance_statistics(&joined),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{date, seed_player};
    use storage::{
        Database, dto::collective_session::CollectiveSessionRequest, models::AttendanceStatus,
    };

    async fn seed_collective(store: &dyn DocumentStore, kind: &str, day: u32) -> CollectiveSession {
        CollectiveSessionRepository::new(store)
            .create(&CollectiveSessionRequest {
                session_type: kind.into(),
                session_date: date(2026, 9, day),
                session_time: "18:00".into(),
                location: None,
                coach: None,
                notes: None,
            })
            .await
            .unwrap()
    }

    fn request(session: &CollectiveSession, player_id: &str, status: AttendanceStatus) -> CreateAttendanceRequest {
        CreateAttendanceRequest {
            collective_session_id: session.id.clone(),
            player_id: player_id.into(),
            status,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_report_rates() {
        let db = Database::in_memory();
        let player = seed_player(db.store(), "Lina", "Diallo").await;
        let statuses = [
            AttendanceStatus::Present,
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Injured,
        ];
        for (day, status) in (1..).zip(statuses) {
            let session = seed_collective(db.store(), "U18", day).await;
            record_attendance(db.store(), &request(&session, &player.id, status))
                .await
                .unwrap();
        }

        let report = attendance_report(db.store(), &player.id, &DateRange::default())
            .await
            .unwrap();

        assert_eq!(report.statistics.total_sessions, 4);
        assert_eq!(report.statistics.presence_rate, 50.0);
        assert_eq!(report.statistics.absence_rate, 25.0);
        assert_eq!(report.statistics.injury_rate, 25.0);
        assert_eq!(report.statistics.by_type["U18"].present, 2);
        assert_eq!(report.statistics.recent_attendances[0].session_date, "2026-09-04");
    }

    #[tokio::test]
    async fn test_report_without_attendance_is_zero() {
        let db = Database::in_memory();
        let player = seed_player(db.store(), "Lina", "Diallo").await;

        let report = attendance_report(db.store(), &player.id, &DateRange::default())
            .await
            .unwrap();

        assert_eq!(report.statistics.total_sessions, 0);
        assert_eq!(report.statistics.presence_rate, 0.0);
    }

    #[tokio::test]
    async fn test_unknown_session_is_rejected() {
        let db = Database::in_memory();
        let player = seed_player(db.store(), "Lina", "Diallo").await;

        let result = record_attendance(
            db.store(),
            &CreateAttendanceRequest {
                collective_session_id: "ghost".into(),
                player_id: player.id,
                status: AttendanceStatus::Present,
                notes: None,
            },
        )
        .await;

        assert!(matches!(result, Err(StorageError::Validation(_))));
    }

    #[tokio::test]
    async fn test_player_attendances_respect_range() {
        let db = Database::in_memory();
        let player = seed_player(db.store(), "Lina", "Diallo").await;
        for day in [2, 12, 22] {
            let session = seed_collective(db.store(), "U21", day).await;
            record_attendance(
                db.store(),
                &request(&session, &player.id, AttendanceStatus::Present),
            )
            .await
            .unwrap();
        }

        let range = DateRange::new(Some(date(2026, 9, 10)), Some(date(2026, 9, 30)));
        let listed = list_player_attendances(db.store(), &player.id, &range)
            .await
            .unwrap();

        let dates: Vec<&str> = listed.iter().map(|a| a.session.session_date.as_str()).collect();
        assert_eq!(dates, vec!["2026-09-22", "2026-09-12"]);
    }

    #[tokio::test]
    async fn test_session_listing_skips_deleted_players() {
        let db = Database::in_memory();
        let lina = seed_player(db.store(), "Lina", "Diallo").await;
        let hugo = seed_player(db.store(), "Hugo", "Martin").await;
        let session = seed_collective(db.store(), "U18", 5).await;
        for id in [&lina.id, &hugo.id] {
            record_attendance(db.store(), &request(&session, id, AttendanceStatus::Off))
                .await
                .unwrap();
        }
        PlayerRepository::new(db.store()).delete(&hugo.id).await.unwrap();

        let listed = list_session_attendances(db.store(), &session.id).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].player.id, lina.id);
    }
}
