// ABOUTME: Derived calendar day status used by the adherence calendar
// ABOUTME: Never persisted; computed from the schedule and the compliance log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status of one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarStatus {
    /// After today
    Future,
    /// Active day with a completed record
    Completed,
    /// Past active day whose record is not completed
    Missed,
    /// Weekday with nothing scheduled
    Rest,
    /// Active day with no verdict yet
    Pending,
}

/// One entry of the rolling calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// Calendar date
    pub date: NaiveDate,
    /// Derived status
    pub status: CalendarStatus,
}
