use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Participation of one player in one match. `(match_id, player_id)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MatchParticipation {
    pub id: String,
    pub match_id: String,
    pub player_id: String,
    pub is_present: bool,
    pub is_starter: bool,
    /// Minutes on court.
    pub play_time: Option<u32>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl MatchParticipation {
    pub const NATURAL_KEY: [&'static str; 2] = ["match_id", "player_id"];

    /// Play time counted in averages: present, with a non-zero time.
    pub fn counted_play_time(&self) -> Option<u32> {
        match self.play_time {
            Some(minutes) if self.is_present && minutes > 0 => Some(minutes),
            _ => None,
        }
    }
}
