//! Fixtures shared by the service and router tests.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use storage::{
    Database,
    dto::{player::CreatePlayerRequest, session::CreateSessionRequest},
    models::{Player, Session},
    repository::{player::PlayerRepository, session::SessionRepository},
    store::DocumentStore,
};

use crate::clock::FixedClock;
use crate::state::AppState;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 2026-10-16 14:00, the instant every test runs at.
pub fn test_now() -> NaiveDateTime {
    date(2026, 10, 16).and_hms_opt(14, 0, 0).unwrap()
}

pub fn test_state() -> AppState {
    AppState::new(Database::in_memory(), Arc::new(FixedClock(test_now())))
}

pub fn player_request(first: &str, last: &str, position: &str) -> CreatePlayerRequest {
    CreatePlayerRequest {
        first_name: first.into(),
        last_name: last.into(),
        date_of_birth: date(2008, 5, 17),
        position: position.into(),
        coach_referent: None,
        photo: None,
    }
}

pub async fn seed_player(store: &dyn DocumentStore, first: &str, last: &str) -> Player {
    PlayerRepository::new(store)
        .create(&player_request(first, last, "Meneur"))
        .await
        .unwrap()
}

pub async fn seed_session(
    store: &dyn DocumentStore,
    day: NaiveDate,
    player_ids: &[&str],
    themes: &[&str],
    trainers: &[&str],
) -> Session {
    SessionRepository::new(store)
        .create(&CreateSessionRequest {
            player_ids: player_ids.iter().map(|id| id.to_string()).collect(),
            session_date: day,
            themes: themes.iter().map(|t| t.to_string()).collect(),
            trainers: trainers.iter().map(|t| t.to_string()).collect(),
            content_details: String::new(),
            notes: None,
        })
        .await
        .unwrap()
}
