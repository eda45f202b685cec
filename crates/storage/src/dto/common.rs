use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Inclusive date bounds accepted by the player, coach and attendance
/// reports. Either bound may be left open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Whether a record dated `date` falls in the range. Undated (or
    /// unparseable) records only pass an unbounded range.
    pub fn admits(&self, date: Option<NaiveDate>) -> bool {
        if !self.is_bounded() {
            return true;
        }

        let Some(date) = date else {
            return false;
        };

        self.start_date.is_none_or(|start| date >= start)
            && self.end_date.is_none_or(|end| date <= end)
    }

    pub fn validate(&self) -> Result<(), String> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => {
                Err("start_date must not be after end_date".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Optional calendar-month filter used by list endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthParams {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl MonthParams {
    /// `[first day of month, first day of next month)` as ISO strings, when
    /// both month and year are given.
    pub fn bounds(&self) -> Result<Option<(String, String)>, String> {
        let (Some(month), Some(year)) = (self.month, self.year) else {
            return Ok(None);
        };

        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| "month must be between 1 and 12".to_string())?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| "year is out of range".to_string())?;

        Ok(Some((start.to_string(), end.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let range = DateRange::new(Some(date(2026, 1, 1)), Some(date(2026, 1, 31)));

        assert!(range.admits(Some(date(2026, 1, 1))));
        assert!(range.admits(Some(date(2026, 1, 31))));
        assert!(!range.admits(Some(date(2026, 2, 1))));
        assert!(!range.admits(None));
    }

    #[test]
    fn test_unbounded_range_admits_everything() {
        let range = DateRange::default();

        assert!(range.admits(None));
        assert!(range.admits(Some(date(1999, 5, 5))));
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let range = DateRange::new(Some(date(2026, 2, 1)), Some(date(2026, 1, 1)));
        assert!(range.validate().is_err());
    }

    #[test]
    fn test_month_bounds_wrap_december() {
        let params = MonthParams {
            month: Some(12),
            year: Some(2025),
        };

        assert_eq!(
            params.bounds().unwrap(),
            Some(("2025-12-01".to_string(), "2026-01-01".to_string()))
        );
        assert!(MonthParams { month: Some(13), year: Some(2025) }.bounds().is_err());
        assert_eq!(MonthParams { month: Some(3), year: None }.bounds().unwrap(), None);
    }
}
