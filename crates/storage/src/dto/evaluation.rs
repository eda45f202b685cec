use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::EvaluationTheme;

/// Request payload for evaluating a player. A second evaluation of the same
/// type for the same player replaces the first.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEvaluationRequest {
    #[validate(length(min = 1))]
    pub player_id: String,

    #[validate(nested)]
    pub themes: Vec<EvaluationTheme>,

    pub notes: Option<String>,

    pub evaluation_date: Option<NaiveDateTime>,

    #[validate(length(min = 1, max = 50))]
    pub evaluation_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEvaluationRequest {
    #[validate(nested)]
    pub themes: Option<Vec<EvaluationTheme>>,
    pub notes: Option<String>,
}

/// Averages rolled up over a set of evaluations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EvaluationRollup {
    pub theme_averages: BTreeMap<String, f64>,
    pub overall_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlayerEvaluationAverage {
    pub player_id: String,
    #[serde(flatten)]
    pub rollup: EvaluationRollup,
    pub evaluation_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GlobalEvaluationAverage {
    #[serde(flatten)]
    pub rollup: EvaluationRollup,
    pub total_evaluations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PositionEvaluationAverage {
    pub position: String,
    #[serde(flatten)]
    pub rollup: EvaluationRollup,
    pub total_evaluations: usize,
    pub players_count: usize,
}
