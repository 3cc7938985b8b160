// ABOUTME: Database operations for weight progress entries
// ABOUTME: Opening a new entry closes the previously active one in the same transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use fitcontrol_core::constants::adherence::DATE_FORMAT;
use fitcontrol_core::models::{WeightProgress, WeightProgressUpdate};
use sqlx::{sqlite::SqliteRow, SqlitePool};
use uuid::Uuid;

use super::{column, db_error, parse_stored_date, parse_timestamp, parse_uuid};
use crate::errors::AppResult;

const PROGRESS_COLUMNS: &str =
    "id, user_id, started_on, ended_on, current_weight, target_weight, goal, is_active, created_at";

/// Weight progress storage
pub struct ProgressManager {
    pool: SqlitePool,
}

impl ProgressManager {
    /// Create a new manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an active entry, deactivating the user's previous active entries
    ///
    /// # Errors
    ///
    /// Returns an error if either statement fails; nothing is written in that case.
    pub async fn create(&self, progress: &WeightProgress) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin progress transaction"))?;

        if progress.is_active {
            sqlx::query(
                r"
                UPDATE weight_progress
                SET is_active = 0, ended_on = COALESCE(ended_on, $2)
                WHERE user_id = $1 AND is_active = 1
                ",
            )
            .bind(progress.user_id.to_string())
            .bind(progress.started_on.format(DATE_FORMAT).to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to close previous progress entry"))?;
        }

        sqlx::query(
            r"
            INSERT INTO weight_progress
                (id, user_id, started_on, ended_on, current_weight, target_weight, goal, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(progress.id.to_string())
        .bind(progress.user_id.to_string())
        .bind(progress.started_on.format(DATE_FORMAT).to_string())
        .bind(progress.ended_on.map(|d| d.format(DATE_FORMAT).to_string()))
        .bind(progress.current_weight)
        .bind(progress.target_weight)
        .bind(&progress.goal)
        .bind(progress.is_active)
        .bind(progress.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to create progress entry"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit progress transaction"))?;
        Ok(())
    }

    /// Get an entry by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt.
    pub async fn get(&self, progress_id: Uuid) -> AppResult<Option<WeightProgress>> {
        let row = sqlx::query(&format!(
            "SELECT {PROGRESS_COLUMNS} FROM weight_progress WHERE id = $1"
        ))
        .bind(progress_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to get progress entry"))?;

        row.as_ref().map(row_to_progress).transpose()
    }

    /// The user's active entry, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt.
    pub async fn get_active(&self, user_id: Uuid) -> AppResult<Option<WeightProgress>> {
        let row = sqlx::query(&format!(
            r"
            SELECT {PROGRESS_COLUMNS} FROM weight_progress
            WHERE user_id = $1 AND is_active = 1
            ORDER BY started_on DESC, created_at DESC
            LIMIT 1
            "
        ))
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to get active progress entry"))?;

        row.as_ref().map(row_to_progress).transpose()
    }

    /// All entries of a user, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<WeightProgress>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {PROGRESS_COLUMNS} FROM weight_progress
            WHERE user_id = $1
            ORDER BY started_on DESC, created_at DESC
            "
        ))
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list progress entries"))?;

        rows.iter().map(row_to_progress).collect()
    }

    /// Apply a partial update, returning the updated entry
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update(
        &self,
        progress_id: Uuid,
        update: &WeightProgressUpdate,
    ) -> AppResult<Option<WeightProgress>> {
        let updated = sqlx::query(
            r"
            UPDATE weight_progress SET
                ended_on = COALESCE($2, ended_on),
                current_weight = COALESCE($3, current_weight),
                target_weight = COALESCE($4, target_weight),
                goal = COALESCE($5, goal),
                is_active = COALESCE($6, is_active)
            WHERE id = $1
            ",
        )
        .bind(progress_id.to_string())
        .bind(update.ended_on.map(|d| d.format(DATE_FORMAT).to_string()))
        .bind(update.current_weight)
        .bind(update.target_weight)
        .bind(update.goal.as_deref())
        .bind(update.is_active)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update progress entry"))?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(progress_id).await
    }

    /// Delete an entry; `false` if it did not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete(&self, progress_id: Uuid) -> AppResult<bool> {
        let deleted = sqlx::query("DELETE FROM weight_progress WHERE id = $1")
            .bind(progress_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete progress entry"))?;
        Ok(deleted.rows_affected() > 0)
    }
}

fn row_to_progress(row: &SqliteRow) -> AppResult<WeightProgress> {
    let id: String = column(row, "id")?;
    let user_id: String = column(row, "user_id")?;
    let started_on: String = column(row, "started_on")?;
    let ended_on: Option<String> = column(row, "ended_on")?;
    let created_at: String = column(row, "created_at")?;

    Ok(WeightProgress {
        id: parse_uuid(&id, "weight_progress.id")?,
        user_id: parse_uuid(&user_id, "weight_progress.user_id")?,
        started_on: parse_stored_date(&started_on, "weight_progress.started_on")?,
        ended_on: ended_on
            .as_deref()
            .map(|d| parse_stored_date(d, "weight_progress.ended_on"))
            .transpose()?,
        current_weight: column(row, "current_weight")?,
        target_weight: column(row, "target_weight")?,
        goal: column(row, "goal")?,
        is_active: column(row, "is_active")?,
        created_at: parse_timestamp(&created_at, "weight_progress.created_at")?,
    })
}
