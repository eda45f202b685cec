use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub mod attendance;
pub mod coach;
pub mod collective_session;
pub mod evaluation;
pub mod matches;
pub mod participation;
pub mod player;
pub mod session;
pub mod user;

pub use attendance::{Attendance, AttendanceStatus};
pub use coach::Coach;
pub use collective_session::CollectiveSession;
pub use evaluation::{EvaluationAspect, EvaluationTheme, PlayerEvaluation};
pub use matches::{Match, Team};
pub use participation::MatchParticipation;
pub use player::Player;
pub use session::Session;
pub use user::{Role, User};

/// Parses a stored ISO date, accepting both `YYYY-MM-DD` and full
/// timestamps. Returns `None` for anything else.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            value
                .parse::<NaiveDateTime>()
                .ok()
                .map(|datetime| datetime.date())
        })
}

/// Parses a stored ISO date or timestamp. A bare date reads as midnight.
pub fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    value.parse::<NaiveDateTime>().ok().or_else(|| {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN))
    })
}

/// Fresh document id (UUID v4).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 14);

        assert_eq!(parse_iso_date("2026-03-14"), expected);
        assert_eq!(parse_iso_date("2026-03-14T18:30:00"), expected);
        assert_eq!(parse_iso_date("14/03/2026"), None);
        assert_eq!(parse_iso_date(""), None);
    }

    #[test]
    fn test_parse_iso_datetime_keeps_time() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 11).unwrap();

        assert_eq!(
            parse_iso_datetime("2026-10-11T18:00:00"),
            day.and_hms_opt(18, 0, 0)
        );
        assert_eq!(parse_iso_datetime("2026-10-11"), day.and_hms_opt(0, 0, 0));
        assert_eq!(parse_iso_datetime("11/10/2026"), None);
    }
}
