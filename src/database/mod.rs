// ABOUTME: SQLite record store for users, plans, compliance records, progress, and energy profiles
// ABOUTME: Owns the connection pool, schema migrations, and shared row-decoding helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! # Database Management
//!
//! One `SQLite` pool shared by per-table managers. Identifiers are stored as
//! TEXT UUIDs, timestamps as RFC 3339 strings, and calendar dates as
//! `YYYY-MM-DD` so lexical order matches chronological order.

mod compliance;
mod energy;
mod plans;
mod progress;
mod users;

pub use compliance::ComplianceManager;
pub use energy::EnergyManager;
pub use plans::PlanManager;
pub use progress::ProgressManager;
pub use users::UserManager;

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use fitcontrol_core::constants::adherence::DATE_FORMAT;
use fitcontrol_core::errors::DatabaseError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};

/// Connection pool plus schema management
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database at `url`
    ///
    /// In-memory databases use a single long-lived connection so every
    /// caller sees the same data.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` or `DatabaseError` if the pool cannot be opened.
    pub async fn new(url: &DatabaseUrl, max_connections: u32) -> AppResult<Self> {
        let pool = match url {
            DatabaseUrl::Memory => {
                let options = SqliteConnectOptions::from_str("sqlite::memory:")
                    .map_err(db_error("Failed to parse in-memory database URL"))?
                    .foreign_keys(true);
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await
            }
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::store_unavailable(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .foreign_keys(true);
                SqlitePoolOptions::new()
                    .max_connections(max_connections)
                    .connect_with(options)
                    .await
            }
        }
        .map_err(db_error("Failed to connect to database"))?;

        info!(database = %url, "Database pool opened");
        Ok(Self { pool })
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Verify the store answers queries
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` when the pool cannot serve a query.
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error("Database ping failed"))?;
        Ok(())
    }

    /// Create all tables and indexes
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails.
    pub async fn migrate(&self) -> AppResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(db_error("Failed to run migration"))?;
        }
        debug!(statements = SCHEMA.len(), "Database schema up to date");
        Ok(())
    }
}

const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        username TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        weight_unit TEXT NOT NULL DEFAULT 'kg',
        created_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS plans (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        domain TEXT NOT NULL CHECK (domain IN ('routine', 'diet')),
        name TEXT NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_plans_user_domain ON plans(user_id, domain)",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_plans_one_active ON plans(user_id, domain) WHERE is_active = 1",
    r"
    CREATE TABLE IF NOT EXISTS scheduled_units (
        id TEXT PRIMARY KEY,
        plan_id TEXT NOT NULL REFERENCES plans(id) ON DELETE CASCADE,
        weekday TEXT NOT NULL,
        weekday_index INTEGER NOT NULL CHECK (weekday_index BETWEEN 0 AND 6),
        label TEXT,
        scheduled_time TEXT,
        position INTEGER NOT NULL DEFAULT 0
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_scheduled_units_plan ON scheduled_units(plan_id, weekday_index, position)",
    r"
    CREATE TABLE IF NOT EXISTS plan_activities (
        id TEXT PRIMARY KEY,
        unit_id TEXT NOT NULL REFERENCES scheduled_units(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        position INTEGER NOT NULL DEFAULT 0,
        details TEXT NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_plan_activities_unit ON plan_activities(unit_id, position)",
    r"
    CREATE TABLE IF NOT EXISTS compliance_records (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        domain TEXT NOT NULL CHECK (domain IN ('routine', 'diet')),
        anchor_kind TEXT NOT NULL CHECK (anchor_kind IN ('unit', 'plan')),
        anchor_id TEXT NOT NULL,
        due_date TEXT NOT NULL,
        completed BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        UNIQUE (user_id, anchor_kind, anchor_id, due_date)
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_compliance_user_date ON compliance_records(user_id, due_date)",
    r"
    CREATE TABLE IF NOT EXISTS weight_progress (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        started_on TEXT NOT NULL,
        ended_on TEXT,
        current_weight REAL NOT NULL,
        target_weight REAL NOT NULL,
        goal TEXT NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_weight_progress_user ON weight_progress(user_id, started_on)",
    r"
    CREATE TABLE IF NOT EXISTS energy_profiles (
        user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
        sex TEXT NOT NULL CHECK (sex IN ('male', 'female')),
        age INTEGER NOT NULL,
        height_cm REAL NOT NULL,
        weight_kg REAL NOT NULL,
        activity_factor REAL NOT NULL,
        bmr REAL NOT NULL,
        maintenance_calories REAL NOT NULL,
        deficit_calories REAL NOT NULL,
        surplus_calories REAL NOT NULL,
        ideal_weight_kg REAL NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
];

/// Map a `sqlx::Error` raised during `context` into a classified `AppError`
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| DatabaseError::from_sqlx(context, &e).into()
}

/// Read one column, classifying decode failures as `DatabaseError`
pub(crate) fn column<T>(row: &SqliteRow, name: &str) -> AppResult<T>
where
    T: for<'r> sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get(name).map_err(|e| {
        DatabaseError::from_sqlx(format!("Failed to read column {name}"), &e).into()
    })
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| AppError::database(format!("Invalid UUID in column {column}: {e}")))
}

pub(crate) fn parse_timestamp(value: &str, column: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp in column {column}: {e}")))
}

pub(crate) fn parse_stored_date(value: &str, column: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| AppError::database(format!("Invalid date in column {column}: {e}")))
}

pub(crate) fn to_u32(value: i64, column: &str) -> AppResult<u32> {
    u32::try_from(value)
        .map_err(|_| AppError::database(format!("Value {value} out of range in column {column}")))
}
