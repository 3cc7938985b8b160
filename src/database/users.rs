// ABOUTME: Database operations for user profiles
// ABOUTME: Insert, lookup, and partial update; duplicate e-mail surfaces as ResourceAlreadyExists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use fitcontrol_core::models::{User, UserUpdate};
use sqlx::{sqlite::SqliteRow, SqlitePool};
use uuid::Uuid;

use super::{column, db_error, parse_timestamp, parse_uuid};
use crate::errors::AppResult;

/// User profile storage
pub struct UserManager {
    pool: SqlitePool,
}

impl UserManager {
    /// Create a new manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the e-mail is taken.
    pub async fn create(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, username, email, weight_unit, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.weight_unit)
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to create user"))?;
        Ok(())
    }

    /// Get a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt.
    pub async fn get(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, weight_unit, created_at FROM users WHERE id = $1",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to get user"))?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Apply a partial update, returning the updated user
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the new e-mail is taken.
    pub async fn update(&self, user_id: Uuid, update: &UserUpdate) -> AppResult<Option<User>> {
        let updated = sqlx::query(
            r"
            UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                weight_unit = COALESCE($4, weight_unit)
            WHERE id = $1
            ",
        )
        .bind(user_id.to_string())
        .bind(update.username.as_deref())
        .bind(update.email.as_deref())
        .bind(update.weight_unit.as_deref())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update user"))?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(user_id).await
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id: String = column(row, "id")?;
    let created_at: String = column(row, "created_at")?;

    Ok(User {
        id: parse_uuid(&id, "users.id")?,
        username: column(row, "username")?,
        email: column(row, "email")?,
        weight_unit: column(row, "weight_unit")?,
        created_at: parse_timestamp(&created_at, "users.created_at")?,
    })
}
