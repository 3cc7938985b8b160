// ABOUTME: Streak, calendar, and today's tracker over the record store
// ABOUTME: Loads the active plan and compliance log, runs the engine, and lazily creates today's records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! Adherence service
//!
//! Read path: active plan → active weekdays, compliance log over the engine's
//! window → streak and calendar. Tracker path: additionally ensure every unit
//! due today (and, for diets, the day itself) has a compliance record.
//!
//! Record creation is insert-if-absent guarded by the store's unique key. A
//! concurrent request that wins the race makes our insert fail with
//! `ResourceAlreadyExists`; the existing record is then re-read.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use fitcontrol_core::models::{
    ComplianceKey, ComplianceRecord, PlanActivity, PlanDomain, ScheduledUnit, WeekdayLabel,
};
use fitcontrol_intelligence::reconciliation::ReconciliationPlan;
use fitcontrol_intelligence::{
    adapter_for, ActiveWeekdays, AdherenceEngine, AdherenceSummary, ComplianceLog,
};
use futures_util::{stream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::users::require_user;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;

/// One unit due today with its compliance record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciledUnit {
    /// Scheduled unit
    pub unit_id: Uuid,
    /// Unit label (meal name for diets)
    pub label: Option<String>,
    /// Scheduled time, `HH:MM`
    pub scheduled_time: Option<String>,
    /// Order within the day
    pub position: u32,
    /// Compliance record for today
    pub record_id: Uuid,
    /// Completion flag of that record
    pub completed: bool,
    /// Activities of the unit
    pub activities: Vec<PlanActivity>,
}

/// Today's view of a user's active plan in one domain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodayTracker {
    /// Local date the tracker is for
    pub date: NaiveDate,
    /// Weekday of `date`
    pub weekday: WeekdayLabel,
    /// Domain tracked
    pub domain: PlanDomain,
    /// Active plan, absent when the user has none
    pub plan_id: Option<Uuid>,
    /// Units due today in position order
    pub items: Vec<ReconciledUnit>,
    /// Whether the day counts as completed
    pub day_completed: bool,
    /// Day-level record (diets only)
    pub day_record_id: Option<Uuid>,
}

impl TodayTracker {
    fn empty(date: NaiveDate, domain: PlanDomain) -> Self {
        Self {
            date,
            weekday: WeekdayLabel::from_date(date),
            domain,
            plan_id: None,
            items: Vec::new(),
            day_completed: false,
            day_record_id: None,
        }
    }
}

/// Streak, calendar, and tracker operations
#[derive(Clone)]
pub struct AdherenceService {
    database: Arc<dyn DatabaseProvider>,
    engine: AdherenceEngine,
    concurrency: usize,
}

impl AdherenceService {
    /// Create a service creating at most `concurrency` records at once
    #[must_use]
    pub fn new(
        database: Arc<dyn DatabaseProvider>,
        engine: AdherenceEngine,
        concurrency: usize,
    ) -> Self {
        Self {
            database,
            engine,
            concurrency: concurrency.max(1),
        }
    }

    /// Local date of `now` at the configured offset
    #[must_use]
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.engine.today(now)
    }

    /// Current streak and calendar of `user_id` in `domain`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user and `StoreUnavailable`
    /// when the store cannot be read.
    pub async fn get_streak_and_calendar(
        &self,
        user_id: Uuid,
        domain: PlanDomain,
    ) -> AppResult<AdherenceSummary> {
        let today = self.today(Utc::now());
        self.get_streak_and_calendar_on(user_id, domain, today)
            .await
    }

    /// Streak and calendar as seen on `today`
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_streak_and_calendar`].
    #[instrument(skip(self), fields(user_id = %user_id, domain = %domain))]
    pub async fn get_streak_and_calendar_on(
        &self,
        user_id: Uuid,
        domain: PlanDomain,
        today: NaiveDate,
    ) -> AppResult<AdherenceSummary> {
        require_user(self.database.as_ref(), user_id).await?;

        let plan = self.database.get_active_plan(user_id, domain).await?;
        let active = ActiveWeekdays::from_plan(plan.as_ref());

        let log = match &plan {
            Some(plan) => {
                let anchors = adapter_for(domain).streak_anchors(plan);
                let (from, to) = self.engine.log_window(today);
                let records = self
                    .database
                    .list_compliance_for_anchors(user_id, &anchors, from, to)
                    .await?;
                ComplianceLog::from_records(&records)
            }
            None => ComplianceLog::new(),
        };

        let summary = self.engine.summarize(&active, &log, today);
        debug!(
            active_days = active.len(),
            logged_days = log.len(),
            streak = summary.streak,
            "Adherence computed"
        );
        Ok(summary)
    }

    /// Current streak only
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_streak_and_calendar_on`].
    pub async fn streak_on(
        &self,
        user_id: Uuid,
        domain: PlanDomain,
        today: NaiveDate,
    ) -> AppResult<u32> {
        Ok(self
            .get_streak_and_calendar_on(user_id, domain, today)
            .await?
            .streak)
    }

    /// Today's tracker, creating missing compliance records
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user and `StoreUnavailable`
    /// when the store cannot be read or written.
    pub async fn get_today_tracker(
        &self,
        user_id: Uuid,
        domain: PlanDomain,
    ) -> AppResult<TodayTracker> {
        let now = Utc::now();
        self.get_tracker_on(user_id, domain, self.today(now), now)
            .await
    }

    /// Tracker for `date`, stamping created records with `now`
    ///
    /// Repeated calls for the same date create nothing new and return the
    /// same record identifiers.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_today_tracker`].
    #[instrument(skip(self, now), fields(user_id = %user_id, domain = %domain))]
    pub async fn get_tracker_on(
        &self,
        user_id: Uuid,
        domain: PlanDomain,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<TodayTracker> {
        require_user(self.database.as_ref(), user_id).await?;

        let Some(plan) = self.database.get_active_plan(user_id, domain).await? else {
            return Ok(TodayTracker::empty(date, domain));
        };

        let reconciliation =
            ReconciliationPlan::for_date(user_id, &plan, adapter_for(domain), date);
        let existing = self.database.list_compliance_for_date(user_id, date).await?;
        let missing = reconciliation.missing_keys(&existing);

        let ensured: Vec<(ComplianceRecord, bool)> = stream::iter(missing)
            .map(|key| self.ensure_record(key, domain, now))
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await?;
        let created = ensured.iter().filter(|(_, created)| *created).count();

        let mut by_key: HashMap<ComplianceKey, ComplianceRecord> = existing
            .into_iter()
            .chain(ensured.into_iter().map(|(record, _)| record))
            .map(|record| (record.key(), record))
            .collect();

        let items = reconciliation
            .due_units
            .iter()
            .map(|unit| {
                let record = by_key
                    .remove(&reconciliation.unit_key(unit))
                    .ok_or_else(|| missing_after_reconcile(unit))?;
                Ok(reconciled(unit, &record))
            })
            .collect::<AppResult<Vec<_>>>()?;

        let (day_completed, day_record_id) = match reconciliation.day_key {
            Some(key) => {
                let record = by_key.get(&key).ok_or_else(|| {
                    AppError::internal(format!(
                        "Day record for plan {} on {date} missing after reconciliation",
                        plan.id
                    ))
                })?;
                (record.completed, Some(record.id))
            }
            None => (
                !items.is_empty() && items.iter().all(|item| item.completed),
                None,
            ),
        };

        AppLogger::log_reconciliation(
            user_id,
            domain.as_str(),
            created,
            reconciliation.required_keys().len().saturating_sub(created),
        );

        Ok(TodayTracker {
            date,
            weekday: reconciliation.weekday,
            domain,
            plan_id: Some(plan.id),
            items,
            day_completed,
            day_record_id,
        })
    }

    /// Insert a pending record for `key`, or return the one that beat us to it
    ///
    /// The flag is `true` when this call created the record.
    async fn ensure_record(
        &self,
        key: ComplianceKey,
        domain: PlanDomain,
        now: DateTime<Utc>,
    ) -> AppResult<(ComplianceRecord, bool)> {
        let record = ComplianceRecord::pending(key, domain, now);
        match self.database.insert_compliance(&record).await {
            Ok(()) => Ok((record, true)),
            Err(e) if e.code == ErrorCode::ResourceAlreadyExists => {
                debug!(anchor = %key.anchor.id, date = %key.due_date, "Record already reconciled");
                let existing = self.database.find_compliance(&key).await?.ok_or_else(|| {
                    AppError::internal(format!(
                        "Compliance record for {} on {} reported as duplicate but not found",
                        key.anchor.id, key.due_date
                    ))
                })?;
                Ok((existing, false))
            }
            Err(e) => Err(e),
        }
    }
}

fn reconciled(unit: &ScheduledUnit, record: &ComplianceRecord) -> ReconciledUnit {
    ReconciledUnit {
        unit_id: unit.id,
        label: unit.label.clone(),
        scheduled_time: unit.scheduled_time.clone(),
        position: unit.position,
        record_id: record.id,
        completed: record.completed,
        activities: unit.activities.clone(),
    }
}

fn missing_after_reconcile(unit: &ScheduledUnit) -> AppError {
    AppError::internal(format!(
        "Compliance record for unit {} missing after reconciliation",
        unit.id
    ))
}
