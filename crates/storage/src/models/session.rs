use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{parse_iso_date, parse_iso_datetime};

/// An individual training session in its canonical (normalized) shape.
///
/// `session_date` stays the stored string: older records may hold values
/// that do not parse, and those must still be listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub id: String,
    pub player_ids: Vec<String>,
    pub session_date: String,
    pub themes: Vec<String>,
    pub trainers: Vec<String>,
    pub content_details: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Session {
    pub fn date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.session_date)
    }

    /// Full timestamp when one was stored, midnight otherwise.
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        parse_iso_datetime(&self.session_date)
    }

    pub fn involves(&self, player_id: &str) -> bool {
        self.player_ids.iter().any(|id| id == player_id)
    }
}
