// ABOUTME: Consecutive-day streak over active weekdays
// ABOUTME: Today counts only when completed; the backward walk always starts at yesterday
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use chrono::NaiveDate;

use super::ComplianceLog;
use crate::dates::add_days;
use crate::schedule::ActiveWeekdays;

/// Count consecutive completed active days.
///
/// Today contributes 1 only if it is active and completed. Independently, the
/// walk goes back from yesterday across `lookback_days - 1` days: rest days
/// are skipped, a completed active day adds 1, and the first active day that
/// is missing or not completed ends the walk. An open today therefore never
/// breaks the chain that ended yesterday.
#[must_use]
pub fn compute_streak(
    active: &ActiveWeekdays,
    log: &ComplianceLog,
    today: NaiveDate,
    lookback_days: u32,
) -> u32 {
    if active.is_empty() {
        return 0;
    }

    let mut streak = u32::from(active.is_active_on(today) && log.is_completed(today));

    for offset in 1..i64::from(lookback_days) {
        let date = add_days(today, -offset);
        if !active.is_active_on(date) {
            continue;
        }
        if !log.is_completed(date) {
            break;
        }
        streak += 1;
    }

    streak
}
