// ABOUTME: Energy expenditure profiles: compute from inputs and persist per user
// ABOUTME: Delegates the Mifflin-St Jeor estimate to the intelligence crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use chrono::{DateTime, Utc};
use fitcontrol_core::models::{EnergyInputs, EnergyProfile};
use fitcontrol_intelligence::algorithms::estimate_energy;
use tracing::info;
use uuid::Uuid;

use super::users::require_user;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};

/// Recompute and store a user's energy profile
///
/// # Errors
///
/// Returns `ValueOutOfRange` for implausible inputs and `ResourceNotFound`
/// for an unknown user.
pub async fn upsert_profile(
    database: &dyn DatabaseProvider,
    user_id: Uuid,
    inputs: EnergyInputs,
    now: DateTime<Utc>,
) -> AppResult<EnergyProfile> {
    let estimate = estimate_energy(&inputs)?;
    require_user(database, user_id).await?;

    let profile = EnergyProfile {
        user_id,
        inputs,
        estimate,
        updated_at: now,
    };
    database.upsert_energy_profile(&profile).await?;

    info!(
        user.id = %user_id,
        bmr = profile.estimate.bmr,
        maintenance = profile.estimate.maintenance_calories,
        "Energy profile updated"
    );
    Ok(profile)
}

/// Stored profile of a user
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown user or a user without a profile.
pub async fn get_profile(
    database: &dyn DatabaseProvider,
    user_id: Uuid,
) -> AppResult<EnergyProfile> {
    require_user(database, user_id).await?;
    database
        .get_energy_profile(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Energy profile for user {user_id}")))
}
