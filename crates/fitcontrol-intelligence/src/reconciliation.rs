// ABOUTME: Determines which compliance records today's tracker must have
// ABOUTME: Pure planning step; the service performs the reads and inserts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use std::collections::HashSet;

use chrono::NaiveDate;
use fitcontrol_core::models::{
    ComplianceAnchor, ComplianceKey, ComplianceRecord, Plan, ScheduledUnit, WeekdayLabel,
};
use uuid::Uuid;

use crate::adapters::DomainAdapter;

/// Records required for one user, plan, and date
#[derive(Debug, Clone)]
pub struct ReconciliationPlan<'a> {
    /// Date being reconciled
    pub date: NaiveDate,
    /// Weekday of `date`
    pub weekday: WeekdayLabel,
    /// Non-empty units scheduled on `weekday`, in position order
    pub due_units: Vec<&'a ScheduledUnit>,
    /// Day-level key, present only when something is due
    pub day_key: Option<ComplianceKey>,
    user_id: Uuid,
}

impl<'a> ReconciliationPlan<'a> {
    /// Build the plan for `date`
    #[must_use]
    pub fn for_date(
        user_id: Uuid,
        plan: &'a Plan,
        adapter: &dyn DomainAdapter,
        date: NaiveDate,
    ) -> Self {
        let due_units = units_due_on(plan, date);
        let day_key = if due_units.is_empty() {
            None
        } else {
            adapter
                .day_anchor(plan)
                .map(|anchor| ComplianceKey::new(user_id, anchor, date))
        };

        Self {
            date,
            weekday: WeekdayLabel::from_date(date),
            due_units,
            day_key,
            user_id,
        }
    }

    /// Key of the unit-level record for `unit`
    #[must_use]
    pub const fn unit_key(&self, unit: &ScheduledUnit) -> ComplianceKey {
        ComplianceKey::new(self.user_id, ComplianceAnchor::unit(unit.id), self.date)
    }

    /// Every key the date needs: units first, then the day record
    #[must_use]
    pub fn required_keys(&self) -> Vec<ComplianceKey> {
        self.due_units
            .iter()
            .map(|unit| self.unit_key(unit))
            .chain(self.day_key)
            .collect()
    }

    /// Required keys without a matching record in `existing`
    #[must_use]
    pub fn missing_keys(&self, existing: &[ComplianceRecord]) -> Vec<ComplianceKey> {
        let present: HashSet<ComplianceKey> = existing.iter().map(ComplianceRecord::key).collect();
        self.required_keys()
            .into_iter()
            .filter(|key| !present.contains(key))
            .collect()
    }

    /// Nothing is scheduled on this date
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.due_units.is_empty()
    }
}

/// Units with activities scheduled on the weekday of `date`
#[must_use]
pub fn units_due_on(plan: &Plan, date: NaiveDate) -> Vec<&ScheduledUnit> {
    let weekday = WeekdayLabel::from_date(date);
    let mut units: Vec<&ScheduledUnit> = plan
        .units_on(weekday)
        .filter(|unit| unit.has_activities())
        .collect();
    units.sort_by_key(|unit| unit.position);
    units
}
