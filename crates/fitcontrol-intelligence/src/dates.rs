// ABOUTME: Calendar date helpers for the adherence engine
// ABOUTME: Saturating day arithmetic, fixed-offset local today, and strict date parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use fitcontrol_core::constants::adherence::{
    DATE_FORMAT, MAX_UTC_OFFSET_HOURS, MIN_UTC_OFFSET_HOURS,
};
use fitcontrol_core::errors::{AppError, AppResult};

const SECONDS_PER_HOUR: i32 = 3600;

/// `date` shifted by `days` (negative goes back); saturates at the calendar bounds
#[must_use]
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
            .unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Calendar date of `now` at a fixed UTC offset, independent of the host timezone
#[must_use]
pub fn local_today(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

/// Build a fixed offset from whole hours
///
/// # Errors
///
/// Returns `ConfigInvalid` when `hours` is outside -12..=14.
pub fn offset_from_hours(hours: i32) -> AppResult<FixedOffset> {
    if !(MIN_UTC_OFFSET_HOURS..=MAX_UTC_OFFSET_HOURS).contains(&hours) {
        return Err(AppError::config_invalid(format!(
            "UTC offset must be within {MIN_UTC_OFFSET_HOURS}..={MAX_UTC_OFFSET_HOURS} hours, got {hours}"
        )));
    }
    FixedOffset::east_opt(hours * SECONDS_PER_HOUR)
        .ok_or_else(|| AppError::config_invalid(format!("Invalid UTC offset: {hours}h")))
}

/// Parse a `YYYY-MM-DD` date
///
/// # Errors
///
/// Returns `InvalidFormat` for anything that is not a real calendar date.
pub fn parse_date(input: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|e| {
        AppError::invalid_format(format!("Invalid date '{input}', expected YYYY-MM-DD: {e}"))
    })
}

/// Render a date in storage format
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fitcontrol_core::errors::ErrorCode;

    #[test]
    fn test_add_days_crosses_month_and_year() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(add_days(date, 1), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(
            add_days(date, -366),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
        assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
    }

    #[test]
    fn test_local_today_uses_offset_not_host() {
        // 03:00 UTC is still the previous evening at UTC-6
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 3, 0, 0).unwrap();
        let offset = offset_from_hours(-6).unwrap();
        assert_eq!(
            local_today(now, offset),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );

        let later = Utc.with_ymd_and_hms(2024, 5, 2, 7, 0, 0).unwrap();
        assert_eq!(
            local_today(later, offset),
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
        );
    }

    #[test]
    fn test_offset_range_is_validated() {
        assert!(offset_from_hours(14).is_ok());
        assert_eq!(
            offset_from_hours(-13).unwrap_err().code,
            ErrorCode::ConfigInvalid
        );
    }

    #[test]
    fn test_parse_date_fails_fast() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        for bad in ["2023-02-29", "02/03/2024", "", "2024-13-01"] {
            assert_eq!(parse_date(bad).unwrap_err().code, ErrorCode::InvalidFormat);
        }
    }
}
