use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::parse_iso_date;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CollectiveSession {
    pub id: String,
    /// Open tag, conventionally "U18", "U21", "musculation" or "autre".
    pub session_type: String,
    pub session_date: String,
    pub session_time: String,
    pub location: Option<String>,
    pub coach: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl CollectiveSession {
    pub fn date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.session_date)
    }
}
