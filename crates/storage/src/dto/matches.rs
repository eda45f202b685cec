use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::MonthParams;
use crate::models::Team;

/// Request payload for creating a match
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMatchRequest {
    pub team: Team,

    #[validate(length(min = 1, max = 255, message = "Opponent is required"))]
    pub opponent: String,

    pub match_date: NaiveDate,

    #[validate(length(min = 1, max = 20, message = "Match time is required"))]
    pub match_time: String,

    #[validate(length(min = 1, max = 255, message = "Location is required"))]
    pub location: String,

    pub is_home: bool,

    #[validate(length(max = 255))]
    pub competition: Option<String>,

    #[validate(range(min = 0))]
    pub final_score_us: Option<i32>,

    #[validate(range(min = 0))]
    pub final_score_opponent: Option<i32>,

    #[validate(length(max = 255))]
    pub coach: Option<String>,

    pub notes: Option<String>,
}

/// Request payload for a partial match update. Absent fields are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMatchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub opponent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 20))]
    pub match_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_home: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub competition: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub final_score_us: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub final_score_opponent: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub coach: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MatchFilter {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub team: Option<Team>,
}

impl MatchFilter {
    pub fn month_bounds(&self) -> Result<Option<(String, String)>, String> {
        MonthParams {
            month: self.month,
            year: self.year,
        }
        .bounds()
    }
}
