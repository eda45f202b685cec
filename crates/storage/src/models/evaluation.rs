use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct EvaluationAspect {
    #[validate(length(min = 1, max = 255, message = "Aspect name is required"))]
    pub name: String,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct EvaluationTheme {
    #[validate(length(min = 1, max = 255, message = "Theme name is required"))]
    pub name: String,
    #[validate(nested)]
    pub aspects: Vec<EvaluationAspect>,
    /// Filled in by scoring; ignored on input.
    #[serde(default)]
    pub average_score: Option<f64>,
}

/// One evaluation of a player. `(player_id, evaluation_type)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlayerEvaluation {
    pub id: String,
    pub player_id: String,
    pub evaluator_id: String,
    pub evaluation_date: NaiveDateTime,
    /// Conventionally "initial" or "final".
    pub evaluation_type: String,
    pub themes: Vec<EvaluationTheme>,
    pub overall_average: Option<f64>,
    pub notes: Option<String>,
}

impl PlayerEvaluation {
    pub const NATURAL_KEY: [&'static str; 2] = ["player_id", "evaluation_type"];
    pub const DEFAULT_TYPE: &'static str = "initial";
}
