// ABOUTME: SQLite implementation of the record store trait
// ABOUTME: Delegates each operation to the per-table managers in the database module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! `SQLite` database implementation
//!
//! This module wraps the `SQLite` database functionality
//! to implement the `DatabaseProvider` trait.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use fitcontrol_core::models::{
    ComplianceAnchor, ComplianceKey, ComplianceRecord, EnergyProfile, Plan, PlanDomain, User,
    UserUpdate, WeightProgress, WeightProgressUpdate,
};
use uuid::Uuid;

use super::DatabaseProvider;
use crate::config::DatabaseUrl;
use crate::database::{
    ComplianceManager, Database, EnergyManager, PlanManager, ProgressManager, UserManager,
};
use crate::errors::AppResult;

/// `SQLite` database implementation
#[derive(Clone)]
pub struct SqliteDatabase {
    inner: Database,
}

impl SqliteDatabase {
    /// Open the database at `url`
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be opened.
    pub async fn new(url: &DatabaseUrl, max_connections: u32) -> AppResult<Self> {
        let inner = Database::new(url, max_connections).await?;
        Ok(Self { inner })
    }

    /// Get a reference to the inner database
    #[must_use]
    pub const fn inner(&self) -> &Database {
        &self.inner
    }

    fn users(&self) -> UserManager {
        UserManager::new(self.inner.pool().clone())
    }

    fn plans(&self) -> PlanManager {
        PlanManager::new(self.inner.pool().clone())
    }

    fn compliance(&self) -> ComplianceManager {
        ComplianceManager::new(self.inner.pool().clone())
    }

    fn progress(&self) -> ProgressManager {
        ProgressManager::new(self.inner.pool().clone())
    }

    fn energy(&self) -> EnergyManager {
        EnergyManager::new(self.inner.pool().clone())
    }
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn migrate(&self) -> AppResult<()> {
        self.inner.migrate().await
    }

    async fn ping(&self) -> AppResult<()> {
        self.inner.ping().await
    }

    async fn create_user(&self, user: &User) -> AppResult<()> {
        self.users().create(user).await
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        self.users().get(user_id).await
    }

    async fn update_user(&self, user_id: Uuid, update: &UserUpdate) -> AppResult<Option<User>> {
        self.users().update(user_id, update).await
    }

    async fn create_plan(&self, plan: &Plan) -> AppResult<()> {
        self.plans().create(plan).await
    }

    async fn get_plan(&self, plan_id: Uuid) -> AppResult<Option<Plan>> {
        self.plans().get(plan_id).await
    }

    async fn get_active_plan(&self, user_id: Uuid, domain: PlanDomain) -> AppResult<Option<Plan>> {
        self.plans().get_active(user_id, domain).await
    }

    async fn list_plans(&self, user_id: Uuid, domain: Option<PlanDomain>) -> AppResult<Vec<Plan>> {
        self.plans().list(user_id, domain).await
    }

    async fn replace_plan(&self, plan: &Plan) -> AppResult<()> {
        self.plans().replace(plan).await
    }

    async fn activate_plan(&self, plan_id: Uuid) -> AppResult<()> {
        self.plans().activate(plan_id).await
    }

    async fn delete_plan(&self, plan_id: Uuid) -> AppResult<bool> {
        self.plans().delete(plan_id).await
    }

    async fn insert_compliance(&self, record: &ComplianceRecord) -> AppResult<()> {
        self.compliance().insert(record).await
    }

    async fn get_compliance(&self, record_id: Uuid) -> AppResult<Option<ComplianceRecord>> {
        self.compliance().get(record_id).await
    }

    async fn find_compliance(&self, key: &ComplianceKey) -> AppResult<Option<ComplianceRecord>> {
        self.compliance().find(key).await
    }

    async fn list_compliance_for_anchors(
        &self,
        user_id: Uuid,
        anchors: &[ComplianceAnchor],
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ComplianceRecord>> {
        self.compliance()
            .list_for_anchors(user_id, anchors, from, to)
            .await
    }

    async fn list_compliance_for_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<ComplianceRecord>> {
        self.compliance().list_for_date(user_id, date).await
    }

    async fn set_compliance_completed(
        &self,
        record_id: Uuid,
        completed: bool,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ComplianceRecord>> {
        self.compliance()
            .set_completed(record_id, completed, now)
            .await
    }

    async fn create_progress(&self, progress: &WeightProgress) -> AppResult<()> {
        self.progress().create(progress).await
    }

    async fn get_progress(&self, progress_id: Uuid) -> AppResult<Option<WeightProgress>> {
        self.progress().get(progress_id).await
    }

    async fn get_active_progress(&self, user_id: Uuid) -> AppResult<Option<WeightProgress>> {
        self.progress().get_active(user_id).await
    }

    async fn list_progress(&self, user_id: Uuid) -> AppResult<Vec<WeightProgress>> {
        self.progress().list(user_id).await
    }

    async fn update_progress(
        &self,
        progress_id: Uuid,
        update: &WeightProgressUpdate,
    ) -> AppResult<Option<WeightProgress>> {
        self.progress().update(progress_id, update).await
    }

    async fn delete_progress(&self, progress_id: Uuid) -> AppResult<bool> {
        self.progress().delete(progress_id).await
    }

    async fn upsert_energy_profile(&self, profile: &EnergyProfile) -> AppResult<()> {
        self.energy().upsert(profile).await
    }

    async fn get_energy_profile(&self, user_id: Uuid) -> AppResult<Option<EnergyProfile>> {
        self.energy().get(user_id).await
    }
}
