//! Clock formatting and ISO week helpers
//!
//! Drive-time rules and records are stored as raw seconds; the frontend
//! expects "HH:MM:SS". Week grouping follows ISO-8601 (Monday start, week 1
//! contains the first Thursday of the year) so "this week" and "last week"
//! line up with the tachograph calendar.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimeError {
    #[error("Malformed clock value: {0}")]
    MalformedClock(String),
}

/// Format seconds as "HH:MM:SS". Negative or zero input renders "00:00:00";
/// hours are not wrapped at 24 (weekly totals exceed a day).
pub fn seconds_to_clock(seconds: i64) -> String {
    if seconds <= 0 {
        return "00:00:00".to_string();
    }
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Parse "HH:MM:SS" back into seconds. Fails on missing or non-numeric
/// components; corrupt stored durations must surface, not default to zero.
pub fn clock_to_seconds(text: &str) -> Result<i64, TimeError> {
    let mut parts = text.split(':');
    let (h, m, s) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), Some(s), None) => (h, m, s),
        _ => return Err(TimeError::MalformedClock(text.to_string())),
    };
    let parse = |p: &str| {
        p.trim()
            .parse::<i64>()
            .map_err(|_| TimeError::MalformedClock(text.to_string()))
    };
    Ok(parse(h)? * 3600 + parse(m)? * 60 + parse(s)?)
}

/// ISO-8601 week of a date as (iso_year, iso_week_number).
pub fn iso_week_of(date: NaiveDate) -> (i32, u32) {
    let week = date.iso_week();
    (week.year(), week.week())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(seconds_to_clock(0), "00:00:00");
        assert_eq!(seconds_to_clock(59), "00:00:59");
        assert_eq!(seconds_to_clock(3661), "01:01:01");
        assert_eq!(seconds_to_clock(32_400), "09:00:00");
    }

    #[test]
    fn clamps_negative_to_zero() {
        assert_eq!(seconds_to_clock(-1), "00:00:00");
        assert_eq!(seconds_to_clock(i64::MIN), "00:00:00");
    }

    #[test]
    fn hours_exceed_twenty_four_for_weekly_totals() {
        // 56h weekly cap
        assert_eq!(seconds_to_clock(56 * 3600), "56:00:00");
    }

    #[test]
    fn clock_round_trips() {
        for s in [0i64, 1, 59, 60, 3599, 3600, 32_400, 36_000, 90 * 3600, 86_399] {
            assert_eq!(clock_to_seconds(&seconds_to_clock(s)).unwrap(), s);
        }
    }

    #[test]
    fn rejects_malformed_clock_values() {
        assert!(clock_to_seconds("").is_err());
        assert!(clock_to_seconds("12:00").is_err());
        assert!(clock_to_seconds("12:00:00:00").is_err());
        assert!(clock_to_seconds("aa:bb:cc").is_err());
    }

    #[test]
    fn iso_week_boundary_reference_dates() {
        // 2021-01-04 is a Monday and starts ISO week 1 of 2021;
        // the Sunday before it still belongs to ISO week 53 of 2020.
        let monday = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2021, 1, 3).unwrap();
        assert_eq!(iso_week_of(monday), (2021, 1));
        assert_eq!(iso_week_of(sunday), (2020, 53));
    }

    #[test]
    fn iso_week_changes_on_monday() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        assert_ne!(iso_week_of(monday), iso_week_of(sunday));
    }
}
