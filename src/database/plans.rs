// ABOUTME: Database operations for routine and diet plans with their scheduled units and activities
// ABOUTME: Multi-table writes run in one transaction; at most one active plan per user and domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use std::collections::{HashMap, HashSet};

use fitcontrol_core::models::{
    ActivityDetails, Plan, PlanActivity, PlanDomain, ScheduledUnit, WeekdayLabel,
};
use sqlx::{sqlite::SqliteRow, SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::{column, db_error, parse_timestamp, parse_uuid, to_u32};
use crate::errors::{AppError, AppResult};

/// Plan storage (plans, scheduled units, activities)
pub struct PlanManager {
    pool: SqlitePool,
}

impl PlanManager {
    /// Create a new manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a plan with all of its units and activities
    ///
    /// When the plan is active, every other plan of the same user and domain
    /// is deactivated in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is written in that case.
    pub async fn create(&self, plan: &Plan) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin plan transaction"))?;

        if plan.is_active {
            deactivate_others(&mut tx, plan.user_id, plan.domain).await?;
        }

        sqlx::query(
            r"
            INSERT INTO plans (id, user_id, domain, name, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(plan.id.to_string())
        .bind(plan.user_id.to_string())
        .bind(plan.domain.as_str())
        .bind(&plan.name)
        .bind(plan.is_active)
        .bind(plan.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to create plan"))?;

        for unit in &plan.units {
            upsert_unit(&mut tx, unit).await?;
            insert_activities(&mut tx, unit).await?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit plan transaction"))?;

        debug!(plan.id = %plan.id, units = plan.units.len(), "Plan created");
        Ok(())
    }

    /// Get a fully loaded plan by ID
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row is corrupt.
    pub async fn get(&self, plan_id: Uuid) -> AppResult<Option<Plan>> {
        let row = sqlx::query(
            "SELECT id, user_id, domain, name, is_active, created_at FROM plans WHERE id = $1",
        )
        .bind(plan_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to get plan"))?;

        match row {
            Some(row) => Ok(Some(self.hydrate(&row).await?)),
            None => Ok(None),
        }
    }

    /// Get the active plan of a user for a domain
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row is corrupt.
    pub async fn get_active(&self, user_id: Uuid, domain: PlanDomain) -> AppResult<Option<Plan>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, domain, name, is_active, created_at
            FROM plans
            WHERE user_id = $1 AND domain = $2 AND is_active = 1
            LIMIT 1
            ",
        )
        .bind(user_id.to_string())
        .bind(domain.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to get active plan"))?;

        match row {
            Some(row) => Ok(Some(self.hydrate(&row).await?)),
            None => Ok(None),
        }
    }

    /// List a user's plans, oldest first, optionally filtered by domain
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row is corrupt.
    pub async fn list(&self, user_id: Uuid, domain: Option<PlanDomain>) -> AppResult<Vec<Plan>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, domain, name, is_active, created_at
            FROM plans
            WHERE user_id = $1 AND ($2 IS NULL OR domain = $2)
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(user_id.to_string())
        .bind(domain.map(PlanDomain::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list plans"))?;

        let mut plans = Vec::with_capacity(rows.len());
        for row in &rows {
            plans.push(self.hydrate(row).await?);
        }
        Ok(plans)
    }

    /// Replace the name, units, and activities of an existing plan
    ///
    /// Units whose ID is kept are updated in place so compliance records
    /// anchored on them stay valid. Units missing from `plan` are removed.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the plan does not exist.
    pub async fn replace(&self, plan: &Plan) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin plan transaction"))?;

        let updated = sqlx::query("UPDATE plans SET name = $2 WHERE id = $1")
            .bind(plan.id.to_string())
            .bind(&plan.name)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to update plan"))?;
        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Plan {}", plan.id)));
        }

        sqlx::query(
            r"
            DELETE FROM plan_activities
            WHERE unit_id IN (SELECT id FROM scheduled_units WHERE plan_id = $1)
            ",
        )
        .bind(plan.id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to clear plan activities"))?;

        let existing: Vec<String> =
            sqlx::query_scalar("SELECT id FROM scheduled_units WHERE plan_id = $1")
                .bind(plan.id.to_string())
                .fetch_all(&mut *tx)
                .await
                .map_err(db_error("Failed to list scheduled units"))?;
        let kept: HashSet<String> = plan.units.iter().map(|u| u.id.to_string()).collect();
        for unit_id in existing.iter().filter(|id| !kept.contains(*id)) {
            sqlx::query("DELETE FROM scheduled_units WHERE id = $1")
                .bind(unit_id)
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to remove scheduled unit"))?;
        }

        for unit in &plan.units {
            upsert_unit(&mut tx, unit).await?;
            insert_activities(&mut tx, unit).await?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit plan transaction"))?;

        debug!(plan.id = %plan.id, units = plan.units.len(), "Plan replaced");
        Ok(())
    }

    /// Make `plan_id` the only active plan of its user and domain
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the plan does not exist.
    pub async fn activate(&self, plan_id: Uuid) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin plan transaction"))?;

        let row = sqlx::query("SELECT user_id, domain FROM plans WHERE id = $1")
            .bind(plan_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("Failed to get plan"))?
            .ok_or_else(|| AppError::not_found(format!("Plan {plan_id}")))?;

        let user_id: String = column(&row, "user_id")?;
        let domain: String = column(&row, "domain")?;
        let domain: PlanDomain = domain
            .parse()
            .map_err(|e| AppError::database(format!("Invalid domain in plans.domain: {e}")))?;

        deactivate_others(&mut tx, parse_uuid(&user_id, "plans.user_id")?, domain).await?;

        sqlx::query("UPDATE plans SET is_active = 1 WHERE id = $1")
            .bind(plan_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to activate plan"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit plan transaction"))?;
        Ok(())
    }

    /// Delete a plan together with its compliance records
    ///
    /// Returns `false` if the plan did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a delete fails; nothing is removed in that case.
    pub async fn delete(&self, plan_id: Uuid) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin plan transaction"))?;

        sqlx::query(
            r"
            DELETE FROM compliance_records
            WHERE (anchor_kind = 'plan' AND anchor_id = $1)
               OR (anchor_kind = 'unit'
                   AND anchor_id IN (SELECT id FROM scheduled_units WHERE plan_id = $1))
            ",
        )
        .bind(plan_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to delete plan compliance records"))?;

        let deleted = sqlx::query("DELETE FROM plans WHERE id = $1")
            .bind(plan_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete plan"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit plan transaction"))?;
        Ok(deleted.rows_affected() > 0)
    }

    async fn hydrate(&self, row: &SqliteRow) -> AppResult<Plan> {
        let mut plan = row_to_plan(row)?;

        let unit_rows = sqlx::query(
            r"
            SELECT id, plan_id, weekday_index, label, scheduled_time, position
            FROM scheduled_units
            WHERE plan_id = $1
            ORDER BY weekday_index ASC, position ASC
            ",
        )
        .bind(plan.id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load scheduled units"))?;

        let activity_rows = sqlx::query(
            r"
            SELECT a.id, a.unit_id, a.name, a.position, a.details
            FROM plan_activities a
            JOIN scheduled_units u ON u.id = a.unit_id
            WHERE u.plan_id = $1
            ORDER BY a.unit_id ASC, a.position ASC
            ",
        )
        .bind(plan.id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load plan activities"))?;

        let mut activities: HashMap<Uuid, Vec<PlanActivity>> = HashMap::new();
        for row in &activity_rows {
            let activity = row_to_activity(row)?;
            activities.entry(activity.unit_id).or_default().push(activity);
        }

        plan.units = unit_rows
            .iter()
            .map(|row| {
                let mut unit = row_to_unit(row)?;
                unit.activities = activities.remove(&unit.id).unwrap_or_default();
                Ok(unit)
            })
            .collect::<AppResult<Vec<_>>>()?;
        Ok(plan)
    }
}

async fn deactivate_others(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    domain: PlanDomain,
) -> AppResult<()> {
    sqlx::query("UPDATE plans SET is_active = 0 WHERE user_id = $1 AND domain = $2 AND is_active = 1")
        .bind(user_id.to_string())
        .bind(domain.as_str())
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to deactivate plans"))?;
    Ok(())
}

async fn upsert_unit(conn: &mut SqliteConnection, unit: &ScheduledUnit) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT INTO scheduled_units (id, plan_id, weekday, weekday_index, label, scheduled_time, position)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT(id) DO UPDATE SET
            weekday = excluded.weekday,
            weekday_index = excluded.weekday_index,
            label = excluded.label,
            scheduled_time = excluded.scheduled_time,
            position = excluded.position
        ",
    )
    .bind(unit.id.to_string())
    .bind(unit.plan_id.to_string())
    .bind(unit.weekday.display_name())
    .bind(i64::from(unit.weekday.index()))
    .bind(&unit.label)
    .bind(&unit.scheduled_time)
    .bind(i64::from(unit.position))
    .execute(&mut *conn)
    .await
    .map_err(db_error("Failed to save scheduled unit"))?;
    Ok(())
}

async fn insert_activities(conn: &mut SqliteConnection, unit: &ScheduledUnit) -> AppResult<()> {
    for activity in &unit.activities {
        let details = serde_json::to_string(&activity.details)?;
        sqlx::query(
            r"
            INSERT INTO plan_activities (id, unit_id, name, position, details)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(activity.id.to_string())
        .bind(unit.id.to_string())
        .bind(&activity.name)
        .bind(i64::from(activity.position))
        .bind(details)
        .execute(&mut *conn)
        .await
        .map_err(db_error("Failed to save plan activity"))?;
    }
    Ok(())
}

fn row_to_plan(row: &SqliteRow) -> AppResult<Plan> {
    let id: String = column(row, "id")?;
    let user_id: String = column(row, "user_id")?;
    let domain: String = column(row, "domain")?;
    let created_at: String = column(row, "created_at")?;

    Ok(Plan {
        id: parse_uuid(&id, "plans.id")?,
        user_id: parse_uuid(&user_id, "plans.user_id")?,
        domain: domain
            .parse()
            .map_err(|e| AppError::database(format!("Invalid domain in plans.domain: {e}")))?,
        name: column(row, "name")?,
        is_active: column(row, "is_active")?,
        created_at: parse_timestamp(&created_at, "plans.created_at")?,
        units: Vec::new(),
    })
}

fn row_to_unit(row: &SqliteRow) -> AppResult<ScheduledUnit> {
    let id: String = column(row, "id")?;
    let plan_id: String = column(row, "plan_id")?;
    let weekday_index: i64 = column(row, "weekday_index")?;
    let position: i64 = column(row, "position")?;

    let weekday = u8::try_from(weekday_index)
        .ok()
        .and_then(WeekdayLabel::from_index)
        .ok_or_else(|| {
            AppError::database(format!(
                "Invalid weekday index {weekday_index} in scheduled_units.weekday_index"
            ))
        })?;

    Ok(ScheduledUnit {
        id: parse_uuid(&id, "scheduled_units.id")?,
        plan_id: parse_uuid(&plan_id, "scheduled_units.plan_id")?,
        weekday,
        label: column(row, "label")?,
        scheduled_time: column(row, "scheduled_time")?,
        position: to_u32(position, "scheduled_units.position")?,
        activities: Vec::new(),
    })
}

fn row_to_activity(row: &SqliteRow) -> AppResult<PlanActivity> {
    let id: String = column(row, "id")?;
    let unit_id: String = column(row, "unit_id")?;
    let position: i64 = column(row, "position")?;
    let details: String = column(row, "details")?;
    let details: ActivityDetails = serde_json::from_str(&details).map_err(|e| {
        AppError::database(format!("Invalid JSON in plan_activities.details: {e}"))
    })?;

    Ok(PlanActivity {
        id: parse_uuid(&id, "plan_activities.id")?,
        unit_id: parse_uuid(&unit_id, "plan_activities.unit_id")?,
        name: column(row, "name")?,
        position: to_u32(position, "plan_activities.position")?,
        details,
    })
}
