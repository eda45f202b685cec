use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

use crate::dto::participation::ParticipationWithMatch;
use crate::models::{Coach, Player, Session};

/// Label (theme, trainer or player name) to number of sessions carrying it.
pub type Breakdown = BTreeMap<String, u32>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeamBreakdown {
    pub total: u32,
    pub played: u32,
    pub started: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MatchStats {
    pub total_matches: u32,
    pub matches_played: u32,
    pub matches_started: u32,
    pub total_play_time: u32,
    pub average_play_time: f64,
    pub average_play_time_u18: f64,
    pub average_play_time_u21: f64,
    pub team_breakdown: BTreeMap<String, TeamBreakdown>,
    pub recent_matches: Vec<ParticipationWithMatch>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerReport {
    pub player: Player,
    pub total_sessions: usize,
    pub content_breakdown: Breakdown,
    pub trainer_breakdown: Breakdown,
    pub recent_sessions: Vec<Session>,
    pub match_stats: MatchStats,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoachReport {
    pub coach: Coach,
    pub total_sessions: usize,
    pub theme_breakdown: Breakdown,
    pub player_breakdown: Breakdown,
    pub recent_sessions: Vec<Session>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalendarEntry {
    pub id: String,
    pub title: String,
    pub date: String,
    pub player_names: Vec<String>,
    pub themes: Vec<String>,
    pub trainers: Vec<String>,
    pub content_details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyCount {
    /// `YYYY-MM`
    pub month: String,
    /// e.g. "March 2026"
    pub label: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlayerActivity {
    pub player_id: String,
    pub name: String,
    pub session_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardAnalytics {
    pub window_days: u32,
    pub monthly_evolution: Vec<MonthlyCount>,
    pub theme_stats: Breakdown,
    pub coach_stats: Breakdown,
    pub player_activity: Vec<PlayerActivity>,
    pub least_active_players: Vec<PlayerActivity>,
    pub inactive_players: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardParams {
    /// Rolling window in days; 365 or more covers every session.
    #[serde(default = "default_window_days")]
    pub days: u32,
}

impl Default for DashboardParams {
    fn default() -> Self {
        Self {
            days: default_window_days(),
        }
    }
}

fn default_window_days() -> u32 {
    30
}
