use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coach {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub photo: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Coach {
    /// Id carried by coaches synthesized for trainer names with no stored record.
    pub const VIRTUAL_ID: &'static str = "virtual";

    pub fn virtual_coach(name: &str, created_at: NaiveDateTime) -> Self {
        Self {
            id: Self::VIRTUAL_ID.to_string(),
            first_name: name.to_string(),
            last_name: String::new(),
            photo: None,
            created_at,
        }
    }

    /// Whether `query` names this coach by first name, last name or
    /// "first last".
    pub fn answers_to(&self, query: &str) -> bool {
        self.first_name == query
            || self.last_name == query
            || format!("{} {}", self.first_name, self.last_name) == query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coach(first: &str, last: &str) -> Coach {
        Coach {
            id: "c1".into(),
            first_name: first.into(),
            last_name: last.into(),
            photo: None,
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_answers_to_each_name_form() {
        let coach = coach("Léo", "Martin");

        assert!(coach.answers_to("Léo"));
        assert!(coach.answers_to("Martin"));
        assert!(coach.answers_to("Léo Martin"));
        assert!(!coach.answers_to("Leo"));
        assert!(!coach.answers_to("Martin Léo"));
    }
}
