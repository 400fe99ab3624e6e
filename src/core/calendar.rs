//! Calendar-day arithmetic on [`NaiveDate`].
//!
//! Everything here works on whole days with no time-of-day or timezone, so
//! adding days never drifts across daylight-saving changes. ISO strings are
//! parsed once at the boundary with [`parse_iso_date`].

use crate::utils::error::{HerdError, Result};
use chrono::{NaiveDate, TimeDelta, Utc};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Window used by [`is_upcoming`] when the caller has no preference.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 7;

/// Today's calendar date in UTC.
///
/// Only the binaries call this; library functions always take the
/// reference date as a parameter.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Adds `days` calendar days (negative moves backwards).
///
/// Saturates at [`NaiveDate::MIN`] / [`NaiveDate::MAX`] instead of panicking.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let saturated = if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX };
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(saturated)
}

/// Calendar days from `reference` to `target`: positive in the future,
/// negative in the past, zero on the same day.
pub fn days_until(target: NaiveDate, reference: NaiveDate) -> i64 {
    target.signed_duration_since(reference).num_days()
}

/// `target` falls within the next `within_days` days, today included.
pub fn is_upcoming(target: NaiveDate, within_days: i64, reference: NaiveDate) -> bool {
    let days = days_until(target, reference);
    (0..=within_days).contains(&days)
}

pub fn is_overdue(target: NaiveDate, reference: NaiveDate) -> bool {
    days_until(target, reference) < 0
}

/// Parses an ISO-8601 calendar date.
///
/// A trailing time component (`2025-01-01T08:30:00Z` or `2025-01-01 08:30`)
/// is dropped so the result is always the calendar day as written. The date
/// itself must be zero-padded `YYYY-MM-DD`.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    let invalid = || HerdError::InvalidDateError {
        value: value.to_string(),
    };
    let trimmed = value.trim();
    let date_part = match trimmed.find(['T', 't', ' ']) {
        Some(idx) => &trimmed[..idx],
        None => trimmed,
    };

    if !is_padded_iso_date(date_part) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(date_part, ISO_DATE_FORMAT).map_err(|_| invalid())
}

// chrono 的 %m / %d 也接受單位數，這裡先檢查形狀
fn is_padded_iso_date(value: &str) -> bool {
    value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_days_crosses_month_and_leap_day() {
        assert_eq!(add_days(date(2025, 1, 1), 45), date(2025, 2, 15));
        assert_eq!(add_days(date(2024, 2, 28), 1), date(2024, 2, 29));
        assert_eq!(add_days(date(2025, 2, 28), 1), date(2025, 3, 1));
        assert_eq!(add_days(date(2025, 1, 1), 0), date(2025, 1, 1));
        assert_eq!(add_days(date(2025, 1, 1), -1), date(2024, 12, 31));
    }

    #[test]
    fn test_add_days_saturates() {
        assert_eq!(add_days(date(2025, 1, 1), i64::MAX), NaiveDate::MAX);
        assert_eq!(add_days(date(2025, 1, 1), i64::MIN), NaiveDate::MIN);
    }

    #[test]
    fn test_days_until_sign() {
        let reference = date(2025, 10, 15);
        assert_eq!(days_until(date(2025, 10, 11), reference), -4);
        assert_eq!(days_until(date(2025, 10, 15), reference), 0);
        assert_eq!(days_until(date(2025, 10, 22), reference), 7);
    }

    #[test]
    fn test_days_until_inverts_add_days() {
        let start = date(2023, 3, 26);
        for g in [0, 1, 28, 45, 114, 283, 340, 1000] {
            assert_eq!(days_until(add_days(start, g), start), g, "g = {g}");
        }
    }

    #[test]
    fn test_is_upcoming_window_edges() {
        let reference = date(2025, 6, 1);
        assert!(is_upcoming(date(2025, 6, 1), DEFAULT_UPCOMING_WINDOW_DAYS, reference));
        assert!(is_upcoming(date(2025, 6, 8), DEFAULT_UPCOMING_WINDOW_DAYS, reference));
        assert!(!is_upcoming(date(2025, 6, 9), DEFAULT_UPCOMING_WINDOW_DAYS, reference));
        assert!(!is_upcoming(date(2025, 5, 31), DEFAULT_UPCOMING_WINDOW_DAYS, reference));
        assert!(!is_upcoming(date(2025, 6, 1), -1, reference));
    }

    #[test]
    fn test_is_overdue() {
        let reference = date(2025, 6, 1);
        assert!(is_overdue(date(2025, 5, 31), reference));
        assert!(!is_overdue(date(2025, 6, 1), reference));
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2025-01-01").unwrap(), date(2025, 1, 1));
        assert_eq!(parse_iso_date(" 2025-01-01 ").unwrap(), date(2025, 1, 1));
        assert_eq!(parse_iso_date("2025-01-01T23:59:59Z").unwrap(), date(2025, 1, 1));
        assert_eq!(parse_iso_date("2025-01-01 08:30").unwrap(), date(2025, 1, 1));
        assert!(parse_iso_date("2025-02-30").is_err());
        assert!(parse_iso_date("01/02/2025").is_err());
        assert!(parse_iso_date("").is_err());
    }

    #[test]
    fn test_parse_iso_date_requires_zero_padding() {
        assert!(parse_iso_date("2025-1-1").is_err());
        assert!(parse_iso_date("2025-01-1").is_err());
        assert!(parse_iso_date("2025-1-01T00:00:00Z").is_err());
        assert!(parse_iso_date("+2025-01-01").is_err());
        assert_eq!(parse_iso_date("2025-01-09").unwrap(), date(2025, 1, 9));
    }

    #[test]
    fn test_format_iso_date_round_trip() {
        let parsed = parse_iso_date("2025-10-11").unwrap();
        assert_eq!(format_iso_date(parsed), "2025-10-11");
    }
}
