// ABOUTME: Adherence Engine computing streaks and rolling calendars from compliance logs
// ABOUTME: Stateless; the caller supplies active weekdays, the log, and today's local date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! # Adherence Engine
//!
//! Two read-only computations over the same inputs:
//!
//! - [`streak::compute_streak`]: consecutive completed active days ending at
//!   today (or yesterday, when today is still open)
//! - [`calendar::build_calendar`]: a fixed-width window of day statuses
//!   ending at today
//!
//! Rest days (weekdays with nothing scheduled) never break a streak.

/// Rolling calendar of day statuses
pub mod calendar;
/// Consecutive completed active days
pub mod streak;

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use fitcontrol_core::constants::adherence::{
    DEFAULT_CALENDAR_DAYS, DEFAULT_STREAK_LOOKBACK_DAYS, DEFAULT_UTC_OFFSET_HOURS,
};
use fitcontrol_core::errors::{AppError, AppResult};
use fitcontrol_core::models::{CalendarDay, CalendarStatus, ComplianceRecord};
use serde::Serialize;

use crate::dates::{add_days, local_today, offset_from_hours};
use crate::schedule::ActiveWeekdays;

/// Engine parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdherenceConfig {
    /// Offset used to turn the current instant into "today"
    pub utc_offset: FixedOffset,
    /// Days examined by the streak walk, today included
    pub lookback_days: u32,
    /// Calendar width, today included
    pub calendar_days: u32,
}

impl AdherenceConfig {
    /// Build a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the offset is out of range or a window is zero.
    pub fn new(utc_offset_hours: i32, lookback_days: u32, calendar_days: u32) -> AppResult<Self> {
        if lookback_days == 0 {
            return Err(AppError::config_invalid(
                "Streak lookback must cover at least one day",
            ));
        }
        if calendar_days == 0 {
            return Err(AppError::config_invalid(
                "Calendar must cover at least one day",
            ));
        }
        Ok(Self {
            utc_offset: offset_from_hours(utc_offset_hours)?,
            lookback_days,
            calendar_days,
        })
    }
}

impl Default for AdherenceConfig {
    fn default() -> Self {
        Self {
            utc_offset: offset_from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or_else(|_| Utc.fix()),
            lookback_days: DEFAULT_STREAK_LOOKBACK_DAYS,
            calendar_days: DEFAULT_CALENDAR_DAYS,
        }
    }
}

/// Per-date completion flags for one domain.
///
/// Several records on the same date (e.g. two routine units on one weekday)
/// fold together: the date is completed only if every record is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplianceLog {
    days: BTreeMap<NaiveDate, bool>,
}

impl ComplianceLog {
    /// Empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one record's flag for `date`
    pub fn record(&mut self, date: NaiveDate, completed: bool) {
        self.days
            .entry(date)
            .and_modify(|existing| *existing = *existing && completed)
            .or_insert(completed);
    }

    /// Build a log from stored compliance records
    #[must_use]
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ComplianceRecord>,
    {
        records
            .into_iter()
            .map(|record| (record.due_date, record.completed))
            .collect()
    }

    /// Folded flag for `date`; `None` when no record exists
    #[must_use]
    pub fn status(&self, date: NaiveDate) -> Option<bool> {
        self.days.get(&date).copied()
    }

    /// `true` only when a record exists and is completed
    #[must_use]
    pub fn is_completed(&self, date: NaiveDate) -> bool {
        self.status(date) == Some(true)
    }

    /// Number of distinct dates with records
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// No records at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromIterator<(NaiveDate, bool)> for ComplianceLog {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, bool)>>(iter: I) -> Self {
        let mut log = Self::new();
        for (date, completed) in iter {
            log.record(date, completed);
        }
        log
    }
}

/// Streak and calendar for one user and domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdherenceSummary {
    /// Local date the summary was computed for
    pub today: NaiveDate,
    /// Consecutive completed active days
    pub streak: u32,
    /// Rolling calendar, oldest first, ending at `today`
    pub calendar: Vec<CalendarDay>,
}

/// Stateless streak and calendar calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct AdherenceEngine {
    config: AdherenceConfig,
}

impl AdherenceEngine {
    /// Engine with the given parameters
    #[must_use]
    pub const fn new(config: AdherenceConfig) -> Self {
        Self { config }
    }

    /// Engine parameters
    #[must_use]
    pub const fn config(&self) -> &AdherenceConfig {
        &self.config
    }

    /// Local calendar date of `now` at the configured offset
    #[must_use]
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        local_today(now, self.config.utc_offset)
    }

    /// Inclusive date range of records either computation may look at
    #[must_use]
    pub fn log_window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let span = self.config.lookback_days.max(self.config.calendar_days);
        (add_days(today, 1 - i64::from(span)), today)
    }

    /// Current streak
    #[must_use]
    pub fn streak(&self, active: &ActiveWeekdays, log: &ComplianceLog, today: NaiveDate) -> u32 {
        streak::compute_streak(active, log, today, self.config.lookback_days)
    }

    /// Rolling calendar ending at `today`
    #[must_use]
    pub fn calendar(
        &self,
        active: &ActiveWeekdays,
        log: &ComplianceLog,
        today: NaiveDate,
    ) -> Vec<CalendarDay> {
        calendar::build_calendar(active, log, today, self.config.calendar_days)
    }

    /// Status of a single date
    #[must_use]
    pub fn day_status(
        &self,
        active: &ActiveWeekdays,
        log: &ComplianceLog,
        date: NaiveDate,
        today: NaiveDate,
    ) -> CalendarStatus {
        calendar::day_status(active, log, date, today)
    }

    /// Streak and calendar together
    #[must_use]
    pub fn summarize(
        &self,
        active: &ActiveWeekdays,
        log: &ComplianceLog,
        today: NaiveDate,
    ) -> AdherenceSummary {
        AdherenceSummary {
            today,
            streak: self.streak(active, log, today),
            calendar: self.calendar(active, log, today),
        }
    }
}
