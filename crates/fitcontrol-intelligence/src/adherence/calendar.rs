// ABOUTME: Rolling calendar of day statuses ending at today
// ABOUTME: Status priority is future, rest, completed, missed, pending
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use chrono::NaiveDate;
use fitcontrol_core::models::{CalendarDay, CalendarStatus};

use super::ComplianceLog;
use crate::dates::add_days;
use crate::schedule::ActiveWeekdays;

/// Status of `date` relative to `today`
#[must_use]
pub fn day_status(
    active: &ActiveWeekdays,
    log: &ComplianceLog,
    date: NaiveDate,
    today: NaiveDate,
) -> CalendarStatus {
    if date > today {
        return CalendarStatus::Future;
    }
    if !active.is_active_on(date) {
        return CalendarStatus::Rest;
    }
    match log.status(date) {
        Some(true) => CalendarStatus::Completed,
        Some(false) if date < today => CalendarStatus::Missed,
        _ => CalendarStatus::Pending,
    }
}

/// `days` consecutive entries, oldest first, the last one being `today`
#[must_use]
pub fn build_calendar(
    active: &ActiveWeekdays,
    log: &ComplianceLog,
    today: NaiveDate,
    days: u32,
) -> Vec<CalendarDay> {
    (0..i64::from(days))
        .rev()
        .map(|back| {
            let date = add_days(today, -back);
            CalendarDay {
                date,
                status: day_status(active, log, date, today),
            }
        })
        .collect()
}
