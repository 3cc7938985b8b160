// ABOUTME: Database operations for per-user energy profiles
// ABOUTME: One row per user, overwritten on every recomputation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use fitcontrol_core::models::{EnergyEstimate, EnergyInputs, EnergyProfile};
use sqlx::{sqlite::SqliteRow, SqlitePool};
use uuid::Uuid;

use super::{column, db_error, parse_timestamp, parse_uuid, to_u32};
use crate::errors::{AppError, AppResult};

/// Energy profile storage
pub struct EnergyManager {
    pool: SqlitePool,
}

impl EnergyManager {
    /// Create a new manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or overwrite the profile of `profile.user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub async fn upsert(&self, profile: &EnergyProfile) -> AppResult<()> {
        let inputs = &profile.inputs;
        let estimate = &profile.estimate;
        sqlx::query(
            r"
            INSERT INTO energy_profiles
                (user_id, sex, age, height_cm, weight_kg, activity_factor,
                 bmr, maintenance_calories, deficit_calories, surplus_calories, ideal_weight_kg, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT(user_id) DO UPDATE SET
                sex = excluded.sex,
                age = excluded.age,
                height_cm = excluded.height_cm,
                weight_kg = excluded.weight_kg,
                activity_factor = excluded.activity_factor,
                bmr = excluded.bmr,
                maintenance_calories = excluded.maintenance_calories,
                deficit_calories = excluded.deficit_calories,
                surplus_calories = excluded.surplus_calories,
                ideal_weight_kg = excluded.ideal_weight_kg,
                updated_at = excluded.updated_at
            ",
        )
        .bind(profile.user_id.to_string())
        .bind(inputs.sex.as_str())
        .bind(i64::from(inputs.age))
        .bind(inputs.height_cm)
        .bind(inputs.weight_kg)
        .bind(inputs.activity_factor)
        .bind(estimate.bmr)
        .bind(estimate.maintenance_calories)
        .bind(estimate.deficit_calories)
        .bind(estimate.surplus_calories)
        .bind(estimate.ideal_weight_kg)
        .bind(profile.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to save energy profile"))?;
        Ok(())
    }

    /// Get the stored profile of a user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt.
    pub async fn get(&self, user_id: Uuid) -> AppResult<Option<EnergyProfile>> {
        let row = sqlx::query(
            r"
            SELECT user_id, sex, age, height_cm, weight_kg, activity_factor,
                   bmr, maintenance_calories, deficit_calories, surplus_calories, ideal_weight_kg, updated_at
            FROM energy_profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to get energy profile"))?;

        row.as_ref().map(row_to_profile).transpose()
    }
}

fn row_to_profile(row: &SqliteRow) -> AppResult<EnergyProfile> {
    let user_id: String = column(row, "user_id")?;
    let sex: String = column(row, "sex")?;
    let age: i64 = column(row, "age")?;
    let updated_at: String = column(row, "updated_at")?;

    Ok(EnergyProfile {
        user_id: parse_uuid(&user_id, "energy_profiles.user_id")?,
        inputs: EnergyInputs {
            sex: sex
                .parse()
                .map_err(|e| AppError::database(format!("Invalid sex in energy_profiles.sex: {e}")))?,
            age: to_u32(age, "energy_profiles.age")?,
            height_cm: column(row, "height_cm")?,
            weight_kg: column(row, "weight_kg")?,
            activity_factor: column(row, "activity_factor")?,
        },
        estimate: EnergyEstimate {
            bmr: column(row, "bmr")?,
            maintenance_calories: column(row, "maintenance_calories")?,
            deficit_calories: column(row, "deficit_calories")?,
            surplus_calories: column(row, "surplus_calories")?,
            ideal_weight_kg: column(row, "ideal_weight_kg")?,
        },
        updated_at: parse_timestamp(&updated_at, "energy_profiles.updated_at")?,
    })
}
