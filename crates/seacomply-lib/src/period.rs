//! Reporting periods and calendar helpers.

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Construct a date from literal parts at compile time.
pub(crate) const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

/// Calendar-year reporting period. Regulatory constants for a period are
/// resolved as of its last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingPeriod {
    pub year: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportingPeriod {
    pub fn calendar_year(year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(Error::InvalidYear { year })?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(Error::InvalidYear { year })?;
        Ok(Self { year, start, end })
    }

    /// Date used for every constant lookup in this period.
    pub fn as_of(&self) -> NaiveDate {
        self.end
    }

    /// Whether a rule that starts on `effective_from` applies to any part of
    /// this period.
    pub fn covers(&self, effective_from: NaiveDate) -> bool {
        effective_from <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mid_year_launch_covers_that_year_only_onwards() {
        let launch = ymd(2026, 7, 1);
        assert!(!ReportingPeriod::calendar_year(2025).unwrap().covers(launch));
        assert!(ReportingPeriod::calendar_year(2026).unwrap().covers(launch));
        assert!(ReportingPeriod::calendar_year(2027).unwrap().covers(launch));
    }

    #[test]
    fn out_of_range_year_is_rejected() {
        assert!(matches!(
            ReportingPeriod::calendar_year(i32::MAX),
            Err(Error::InvalidYear { .. })
        ));
    }
}
