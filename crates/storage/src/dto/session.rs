use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for creating an individual session
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, message = "At least one player is required"))]
    pub player_ids: Vec<String>,

    pub session_date: NaiveDate,

    #[serde(default)]
    pub themes: Vec<String>,

    #[serde(default)]
    pub trainers: Vec<String>,

    #[serde(default)]
    pub content_details: String,

    pub notes: Option<String>,
}

/// Request payload for a partial session update. Absent fields are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSessionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "At least one player is required"))]
    pub player_ids: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub themes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainers: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_details: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
