use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Injured,
    Off,
}

/// Attendance of one player at one collective session.
/// `(collective_session_id, player_id)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Attendance {
    pub id: String,
    pub collective_session_id: String,
    pub player_id: String,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Attendance {
    pub const NATURAL_KEY: [&'static str; 2] = ["collective_session_id", "player_id"];
}
