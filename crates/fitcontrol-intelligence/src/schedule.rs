// ABOUTME: Schedule Resolver reducing a plan to the weekdays that have work scheduled
// ABOUTME: A weekday is active only if one of its units has a non-empty activity list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use std::collections::BTreeSet;

use chrono::NaiveDate;
use fitcontrol_core::models::{Plan, ScheduledUnit, WeekdayLabel};
use serde::Serialize;

/// Set of weekdays with at least one non-empty scheduled unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActiveWeekdays(BTreeSet<WeekdayLabel>);

impl ActiveWeekdays {
    /// Resolve the active set from a plan's units
    #[must_use]
    pub fn from_units(units: &[ScheduledUnit]) -> Self {
        units
            .iter()
            .filter(|unit| unit.has_activities())
            .map(|unit| unit.weekday)
            .collect()
    }

    /// Resolve the active set of an optional plan; no plan means every day is rest
    #[must_use]
    pub fn from_plan(plan: Option<&Plan>) -> Self {
        plan.map_or_else(Self::default, |plan| Self::from_units(&plan.units))
    }

    /// Whether `weekday` has work scheduled
    #[must_use]
    pub fn contains(&self, weekday: WeekdayLabel) -> bool {
        self.0.contains(&weekday)
    }

    /// Whether `date` falls on an active weekday
    #[must_use]
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.contains(WeekdayLabel::from_date(date))
    }

    /// No weekday is active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of active weekdays (0..=7)
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Active weekdays in Sunday-first order
    pub fn iter(&self) -> impl Iterator<Item = WeekdayLabel> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<WeekdayLabel> for ActiveWeekdays {
    fn from_iter<I: IntoIterator<Item = WeekdayLabel>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
