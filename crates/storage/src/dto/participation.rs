use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Match, MatchParticipation, Player};

/// Records a participation; a second submission for the same match and
/// player replaces the first.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateParticipationRequest {
    #[validate(length(min = 1))]
    pub match_id: String,
    #[validate(length(min = 1))]
    pub player_id: String,
    pub is_present: bool,
    #[serde(default)]
    pub is_starter: bool,
    pub play_time: Option<u32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateParticipationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_present: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_starter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipationWithPlayer {
    pub participation: MatchParticipation,
    pub player: Player,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParticipationWithMatch {
    pub participation: MatchParticipation,
    #[serde(rename = "match")]
    pub match_: Match,
}
