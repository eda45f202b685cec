use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Attendance, AttendanceStatus, CollectiveSession, Player};

/// Records attendance; a second submission for the same session and player
/// replaces the first.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAttendanceRequest {
    #[validate(length(min = 1))]
    pub collective_session_id: String,
    #[validate(length(min = 1))]
    pub player_id: String,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAttendanceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AttendanceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceWithPlayer {
    pub attendance: Attendance,
    pub player: Player,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceWithSession {
    pub attendance: Attendance,
    pub session: CollectiveSession,
}

/// Status counters shared by the overall statistics and each session type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCounts {
    pub total: u32,
    pub present: u32,
    pub absent: u32,
    pub injured: u32,
    pub off: u32,
}

impl StatusCounts {
    pub fn record(&mut self, status: AttendanceStatus) {
        self.total += 1;
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Injured => self.injured += 1,
            AttendanceStatus::Off => self.off += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecentAttendance {
    pub session_date: String,
    pub session_type: String,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceStatistics {
    pub total_sessions: u32,
    pub present: u32,
    pub absent: u32,
    pub injured: u32,
    pub off: u32,
    pub presence_rate: f64,
    pub absence_rate: f64,
    pub injury_rate: f64,
    pub by_type: BTreeMap<String, StatusCounts>,
    pub recent_attendances: Vec<RecentAttendance>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceReport {
    pub player: Player,
    pub statistics: AttendanceStatistics,
}
