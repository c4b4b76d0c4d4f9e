//! Calendar-day helpers for bucketing and request parsing.

use crate::model::EntryValidationError;
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Inclusive `[start, end]` range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The `days` calendar days ending at `today`, `today` included.
    ///
    /// `days == 0` is treated as 1.
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        let span = i64::from(days.max(1)) - 1;
        Self {
            start: today - Duration::days(span),
            end: today,
        }
    }

    /// A single-day window.
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Number of buckets a series over this window holds.
    pub fn len_days(&self) -> usize {
        if self.end < self.start {
            return 0;
        }
        usize::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        days_in_range(self.start, self.end)
    }
}

/// Ascending iterator over every day in `[start, end]`; empty when reversed.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Short weekday label for chart axes (`Mon`..`Sun`).
pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Strict `YYYY-MM-DD` parser.
pub fn parse_entry_date(raw: &str) -> Result<NaiveDate, EntryValidationError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| EntryValidationError::InvalidDate(trimmed.to_string()))
}

/// Resolves an optional request date: absent or blank means `today`,
/// anything else must parse.
pub fn resolve_entry_date(
    raw: Option<&str>,
    today: NaiveDate,
) -> Result<NaiveDate, EntryValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(today),
        Some(value) => parse_entry_date(value),
    }
}

/// Parses an `HH:MM` time of day.
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, EntryValidationError> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .map_err(|_| EntryValidationError::InvalidTime(trimmed.to_string()))
}

/// Formats a time of day as `HH:MM`.
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn trailing_window_includes_today() {
        let window = DateWindow::trailing(date(2024, 3, 7), 7);
        assert_eq!(window.start, date(2024, 3, 1));
        assert_eq!(window.end, date(2024, 3, 7));
        assert_eq!(window.len_days(), 7);
    }

    #[test]
    fn trailing_window_of_zero_days_is_one_day() {
        let today = date(2024, 3, 7);
        assert_eq!(DateWindow::trailing(today, 0), DateWindow::day(today));
    }

    #[test]
    fn days_in_range_crosses_month_and_leap_day() {
        let days: Vec<_> = days_in_range(date(2024, 2, 28), date(2024, 3, 1)).collect();
        assert_eq!(days, vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]);
    }

    #[test]
    fn reversed_range_is_empty() {
        assert_eq!(days_in_range(date(2024, 3, 2), date(2024, 3, 1)).count(), 0);
        assert_eq!(DateWindow::new(date(2024, 3, 2), date(2024, 3, 1)).len_days(), 0);
    }

    #[test]
    fn resolve_entry_date_defaults_blank_and_rejects_garbage() {
        let today = date(2024, 3, 7);
        assert_eq!(resolve_entry_date(None, today), Ok(today));
        assert_eq!(resolve_entry_date(Some("  "), today), Ok(today));
        assert_eq!(resolve_entry_date(Some("2024-01-31"), today), Ok(date(2024, 1, 31)));
        assert_eq!(
            resolve_entry_date(Some("31/01/2024"), today),
            Err(EntryValidationError::InvalidDate("31/01/2024".to_string()))
        );
    }

    #[test]
    fn time_of_day_round_trips_hh_mm() {
        let time = parse_time_of_day("07:05").expect("valid time");
        assert_eq!(format_time_of_day(time), "07:05");
        assert!(parse_time_of_day("25:00").is_err());
    }
}
