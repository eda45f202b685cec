use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Player {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub position: String,
    pub coach_referent: Option<String>,
    /// Opaque photo reference (URL or data URI).
    pub photo: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Player {
    /// "First Last", as shown in reports and the calendar.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
