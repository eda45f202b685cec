use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::MonthParams;

/// Payload for creating or replacing a collective session
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CollectiveSessionRequest {
    #[validate(length(min = 1, max = 100, message = "Session type is required"))]
    pub session_type: String,

    pub session_date: NaiveDate,

    #[validate(length(min = 1, max = 20, message = "Session time is required"))]
    pub session_time: String,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    #[validate(length(max = 255))]
    pub coach: Option<String>,

    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CollectiveSessionFilter {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub session_type: Option<String>,
}

impl CollectiveSessionFilter {
    pub fn month_bounds(&self) -> Result<Option<(String, String)>, String> {
        MonthParams {
            month: self.month,
            year: self.year,
        }
        .bounds()
    }
}
