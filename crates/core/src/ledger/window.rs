//! Date windows used to filter ledger records.
//!
//! Day boundaries are normalized the same way everywhere: a window that runs
//! "through" a day ends at `23:59:59.999` of that day (inclusive), while a
//! window "before" a day stops at `00:00:00.000` of that day (exclusive).

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound of a [`DateWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpperBound {
    /// Records dated at or before the instant.
    Through(DateTime<Utc>),
    /// Records dated strictly before the instant.
    Before(DateTime<Utc>),
    /// No upper bound.
    Open,
}

/// A half-open or closed range of record timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    /// Inclusive lower bound (`None` = since the beginning of the ledger).
    pub from: Option<DateTime<Utc>>,
    /// Upper bound.
    pub to: UpperBound,
}

impl DateWindow {
    /// Every record.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            from: None,
            to: UpperBound::Open,
        }
    }

    /// Records from the start of `start` through the end of `end`.
    #[must_use]
    pub fn period(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            from: Some(start_of_day(start)),
            to: UpperBound::Through(end_of_day(end)),
        }
    }

    /// Every record dated on or before `day`.
    #[must_use]
    pub fn through(day: NaiveDate) -> Self {
        Self {
            from: None,
            to: UpperBound::Through(end_of_day(day)),
        }
    }

    /// Every record dated strictly before `day`.
    #[must_use]
    pub fn before(day: NaiveDate) -> Self {
        Self {
            from: None,
            to: UpperBound::Before(start_of_day(day)),
        }
    }

    /// Whether a record timestamp falls inside the window.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        if self.from.is_some_and(|from| at < from) {
            return false;
        }
        match self.to {
            UpperBound::Through(until) => at <= until,
            UpperBound::Before(until) => at < until,
            UpperBound::Open => true,
        }
    }
}

/// First day of the ledger; cumulative figures are computed from here.
#[must_use]
pub fn ledger_epoch() -> NaiveDate {
    // `NaiveDate::default()` is 1970-01-01.
    NaiveDate::default()
}

/// The calendar day preceding `day`.
#[must_use]
pub fn day_before(day: NaiveDate) -> NaiveDate {
    day.pred_opt().unwrap_or(NaiveDate::MIN)
}

/// `00:00:00.000` UTC of `day`.
#[must_use]
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::default()).and_utc()
}

/// `23:59:59.999` UTC of `day`.
#[must_use]
pub fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    start_of_day(day) + Duration::days(1) - Duration::milliseconds(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_of_day_is_last_millisecond() {
        let end = end_of_day(date(2024, 1, 10));
        assert_eq!(
            end,
            Utc.with_ymd_and_hms(2024, 1, 10, 23, 59, 59).unwrap() + Duration::milliseconds(999)
        );
    }

    #[test]
    fn test_period_includes_both_boundary_days() {
        let window = DateWindow::period(date(2024, 1, 1), date(2024, 1, 31));

        assert!(window.contains(start_of_day(date(2024, 1, 1))));
        assert!(window.contains(end_of_day(date(2024, 1, 31))));
        assert!(!window.contains(start_of_day(date(2024, 2, 1))));
        assert!(!window.contains(end_of_day(date(2023, 12, 31))));
    }

    #[test]
    fn test_before_excludes_target_day() {
        let window = DateWindow::before(date(2024, 1, 10));

        assert!(window.contains(end_of_day(date(2024, 1, 9))));
        assert!(!window.contains(start_of_day(date(2024, 1, 10))));
    }

    #[test]
    fn test_through_includes_whole_target_day() {
        let window = DateWindow::through(date(2024, 1, 10));

        assert!(window.contains(Utc.with_ymd_and_hms(2024, 1, 10, 18, 30, 0).unwrap()));
        assert!(!window.contains(start_of_day(date(2024, 1, 11))));
    }

    #[test]
    fn test_opening_and_period_windows_do_not_overlap() {
        let start = date(2024, 3, 1);
        let opening = DateWindow::through(day_before(start));
        let period = DateWindow::period(start, date(2024, 3, 31));
        let at_start = start_of_day(start);

        assert!(!opening.contains(at_start));
        assert!(period.contains(at_start));
    }

    #[test]
    fn test_epoch_and_day_before() {
        assert_eq!(ledger_epoch(), date(1970, 1, 1));
        assert_eq!(day_before(date(2024, 3, 1)), date(2024, 2, 29));
        assert_eq!(day_before(NaiveDate::MIN), NaiveDate::MIN);
    }

    #[test]
    fn test_inverted_period_is_empty() {
        let window = DateWindow::period(date(2024, 2, 1), date(2024, 1, 31));
        assert!(!window.contains(start_of_day(date(2024, 2, 1))));
        assert!(!window.contains(end_of_day(date(2024, 1, 31))));
    }
}
