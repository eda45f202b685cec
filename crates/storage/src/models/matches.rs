use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Team {
    U18,
    U21,
}

impl Team {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::U18 => "U18",
            Self::U21 => "U21",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Match {
    pub id: String,
    pub team: Team,
    pub opponent: String,
    pub match_date: NaiveDate,
    pub match_time: String,
    pub location: String,
    pub is_home: bool,
    pub competition: Option<String>,
    pub final_score_us: Option<i32>,
    pub final_score_opponent: Option<i32>,
    pub coach: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}
