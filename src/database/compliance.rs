// ABOUTME: Database operations for compliance records keyed by user, anchor, and due date
// ABOUTME: The unique key makes concurrent creation of the same record fail with ResourceAlreadyExists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use chrono::{DateTime, NaiveDate, Utc};
use fitcontrol_core::constants::adherence::DATE_FORMAT;
use fitcontrol_core::models::{
    AnchorKind, ComplianceAnchor, ComplianceKey, ComplianceRecord,
};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use super::{column, db_error, parse_stored_date, parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};

const RECORD_COLUMNS: &str =
    "id, user_id, domain, anchor_kind, anchor_id, due_date, completed, created_at, updated_at";

/// Compliance record storage
pub struct ComplianceManager {
    pool: SqlitePool,
}

impl ComplianceManager {
    /// Create a new manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new record
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` when a record with the same
    /// (user, anchor, due date) key is already stored.
    pub async fn insert(&self, record: &ComplianceRecord) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO compliance_records
                (id, user_id, domain, anchor_kind, anchor_id, due_date, completed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(record.id.to_string())
        .bind(record.user_id.to_string())
        .bind(record.domain.as_str())
        .bind(record.anchor.kind.as_str())
        .bind(record.anchor.id.to_string())
        .bind(record.due_date.format(DATE_FORMAT).to_string())
        .bind(record.completed)
        .bind(record.created_at.to_rfc3339())
        .bind(record.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert compliance record"))?;
        Ok(())
    }

    /// Get a record by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt.
    pub async fn get(&self, record_id: Uuid) -> AppResult<Option<ComplianceRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {RECORD_COLUMNS} FROM compliance_records WHERE id = $1"
        ))
        .bind(record_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to get compliance record"))?;

        row.as_ref().map(row_to_record).transpose()
    }

    /// Find the record stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt.
    pub async fn find(&self, key: &ComplianceKey) -> AppResult<Option<ComplianceRecord>> {
        let row = sqlx::query(&format!(
            r"
            SELECT {RECORD_COLUMNS} FROM compliance_records
            WHERE user_id = $1 AND anchor_kind = $2 AND anchor_id = $3 AND due_date = $4
            "
        ))
        .bind(key.user_id.to_string())
        .bind(key.anchor.kind.as_str())
        .bind(key.anchor.id.to_string())
        .bind(key.due_date.format(DATE_FORMAT).to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find compliance record"))?;

        row.as_ref().map(row_to_record).transpose()
    }

    /// Records of `user_id` on any of `anchors` with due date in `[from, to]`,
    /// ordered by due date
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub async fn list_for_anchors(
        &self,
        user_id: Uuid,
        anchors: &[ComplianceAnchor],
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ComplianceRecord>> {
        if anchors.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
            "SELECT {RECORD_COLUMNS} FROM compliance_records WHERE user_id = "
        ));
        builder.push_bind(user_id.to_string());
        builder.push(" AND due_date BETWEEN ");
        builder.push_bind(from.format(DATE_FORMAT).to_string());
        builder.push(" AND ");
        builder.push_bind(to.format(DATE_FORMAT).to_string());
        builder.push(" AND (");
        let mut separated = builder.separated(" OR ");
        for anchor in anchors {
            separated.push("(anchor_kind = ");
            separated.push_bind_unseparated(anchor.kind.as_str());
            separated.push_unseparated(" AND anchor_id = ");
            separated.push_bind_unseparated(anchor.id.to_string());
            separated.push_unseparated(")");
        }
        builder.push(") ORDER BY due_date ASC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list compliance records"))?;

        rows.iter().map(row_to_record).collect()
    }

    /// All records of `user_id` due on `date`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt.
    pub async fn list_for_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<ComplianceRecord>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {RECORD_COLUMNS} FROM compliance_records
            WHERE user_id = $1 AND due_date = $2
            ORDER BY domain ASC, anchor_kind ASC, created_at ASC
            "
        ))
        .bind(user_id.to_string())
        .bind(date.format(DATE_FORMAT).to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list compliance records for date"))?;

        rows.iter().map(row_to_record).collect()
    }

    /// Set the completed flag of a record, returning the updated record
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn set_completed(
        &self,
        record_id: Uuid,
        completed: bool,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ComplianceRecord>> {
        let updated = sqlx::query(
            "UPDATE compliance_records SET completed = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(record_id.to_string())
        .bind(completed)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update compliance record"))?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(record_id).await
    }
}

fn row_to_record(row: &SqliteRow) -> AppResult<ComplianceRecord> {
    let id: String = column(row, "id")?;
    let user_id: String = column(row, "user_id")?;
    let domain: String = column(row, "domain")?;
    let anchor_kind: String = column(row, "anchor_kind")?;
    let anchor_id: String = column(row, "anchor_id")?;
    let due_date: String = column(row, "due_date")?;
    let created_at: String = column(row, "created_at")?;
    let updated_at: String = column(row, "updated_at")?;

    let kind: AnchorKind = anchor_kind.parse().map_err(|e| {
        AppError::database(format!("Invalid anchor kind in compliance_records.anchor_kind: {e}"))
    })?;

    Ok(ComplianceRecord {
        id: parse_uuid(&id, "compliance_records.id")?,
        user_id: parse_uuid(&user_id, "compliance_records.user_id")?,
        domain: domain.parse().map_err(|e| {
            AppError::database(format!("Invalid domain in compliance_records.domain: {e}"))
        })?,
        anchor: ComplianceAnchor {
            kind,
            id: parse_uuid(&anchor_id, "compliance_records.anchor_id")?,
        },
        due_date: parse_stored_date(&due_date, "compliance_records.due_date")?,
        completed: column(row, "completed")?,
        created_at: parse_timestamp(&created_at, "compliance_records.created_at")?,
        updated_at: parse_timestamp(&updated_at, "compliance_records.updated_at")?,
    })
}
