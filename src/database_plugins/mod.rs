// ABOUTME: Record store abstraction for the FitControl server
// ABOUTME: Services depend on this trait so stores can be swapped or faked in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use fitcontrol_core::models::{
    ComplianceAnchor, ComplianceKey, ComplianceRecord, EnergyProfile, Plan, PlanDomain, User,
    UserUpdate, WeightProgress, WeightProgressUpdate,
};
use uuid::Uuid;

use crate::errors::AppResult;

pub mod sqlite;

pub use sqlite::SqliteDatabase;

/// Core record store trait
///
/// Implementations report a missing row as `Ok(None)`, a duplicate
/// compliance key as `ResourceAlreadyExists`, and a store that cannot serve
/// the request as `StoreUnavailable`.
#[async_trait]
pub trait DatabaseProvider: Send + Sync {
    /// Create tables and indexes
    async fn migrate(&self) -> AppResult<()>;

    /// Check the store answers queries
    async fn ping(&self) -> AppResult<()>;

    // ================================
    // Users
    // ================================

    /// Create a user
    async fn create_user(&self, user: &User) -> AppResult<()>;

    /// Get user by ID
    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>>;

    /// Apply a partial update to a user; `None` if absent
    async fn update_user(&self, user_id: Uuid, update: &UserUpdate) -> AppResult<Option<User>>;

    // ================================
    // Plans
    // ================================

    /// Store a new plan with its units and activities
    async fn create_plan(&self, plan: &Plan) -> AppResult<()>;

    /// Get a plan by ID
    async fn get_plan(&self, plan_id: Uuid) -> AppResult<Option<Plan>>;

    /// Get the active plan of a user for a domain
    async fn get_active_plan(&self, user_id: Uuid, domain: PlanDomain) -> AppResult<Option<Plan>>;

    /// List a user's plans
    async fn list_plans(&self, user_id: Uuid, domain: Option<PlanDomain>) -> AppResult<Vec<Plan>>;

    /// Replace an existing plan's name, units, and activities
    async fn replace_plan(&self, plan: &Plan) -> AppResult<()>;

    /// Make a plan the single active plan of its user and domain
    async fn activate_plan(&self, plan_id: Uuid) -> AppResult<()>;

    /// Delete a plan and its compliance records; `false` if absent
    async fn delete_plan(&self, plan_id: Uuid) -> AppResult<bool>;

    // ================================
    // Compliance records
    // ================================

    /// Insert a compliance record
    async fn insert_compliance(&self, record: &ComplianceRecord) -> AppResult<()>;

    /// Get a compliance record by ID
    async fn get_compliance(&self, record_id: Uuid) -> AppResult<Option<ComplianceRecord>>;

    /// Find the compliance record stored under a key
    async fn find_compliance(&self, key: &ComplianceKey) -> AppResult<Option<ComplianceRecord>>;

    /// Records on any of `anchors` due within `[from, to]`
    async fn list_compliance_for_anchors(
        &self,
        user_id: Uuid,
        anchors: &[ComplianceAnchor],
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ComplianceRecord>>;

    /// All records of a user due on `date`
    async fn list_compliance_for_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<ComplianceRecord>>;

    /// Set a record's completed flag
    async fn set_compliance_completed(
        &self,
        record_id: Uuid,
        completed: bool,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ComplianceRecord>>;

    // ================================
    // Weight progress
    // ================================

    /// Open a new progress entry
    async fn create_progress(&self, progress: &WeightProgress) -> AppResult<()>;

    /// Get a progress entry by ID
    async fn get_progress(&self, progress_id: Uuid) -> AppResult<Option<WeightProgress>>;

    /// The user's active progress entry
    async fn get_active_progress(&self, user_id: Uuid) -> AppResult<Option<WeightProgress>>;

    /// All progress entries of a user
    async fn list_progress(&self, user_id: Uuid) -> AppResult<Vec<WeightProgress>>;

    /// Apply a partial update to a progress entry
    async fn update_progress(
        &self,
        progress_id: Uuid,
        update: &WeightProgressUpdate,
    ) -> AppResult<Option<WeightProgress>>;

    /// Delete a progress entry; `false` if absent
    async fn delete_progress(&self, progress_id: Uuid) -> AppResult<bool>;

    // ================================
    // Energy profiles
    // ================================

    /// Save a user's energy profile
    async fn upsert_energy_profile(&self, profile: &EnergyProfile) -> AppResult<()>;

    /// Get a user's energy profile
    async fn get_energy_profile(&self, user_id: Uuid) -> AppResult<Option<EnergyProfile>>;
}
