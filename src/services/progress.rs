// ABOUTME: Weight progress business logic: validation, defaults, partial updates, deletion
// ABOUTME: New entries start on the user's local today unless a start date is given
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use chrono::{DateTime, NaiveDate, Utc};
use fitcontrol_core::models::{NewWeightProgress, WeightProgress, WeightProgressUpdate};
use tracing::info;
use uuid::Uuid;

use super::users::require_user;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};

/// Open a new active progress entry
///
/// # Errors
///
/// Returns a validation error for bad input and `ResourceNotFound` for an
/// unknown user.
pub async fn create_progress(
    database: &dyn DatabaseProvider,
    user_id: Uuid,
    request: NewWeightProgress,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> AppResult<WeightProgress> {
    validate_weight("current_weight", request.current_weight)?;
    validate_weight("target_weight", request.target_weight)?;
    let goal = request.goal.trim();
    if goal.is_empty() {
        return Err(AppError::missing_field("goal"));
    }
    require_user(database, user_id).await?;

    let progress = WeightProgress {
        id: Uuid::new_v4(),
        user_id,
        started_on: request.started_on.unwrap_or(today),
        ended_on: None,
        current_weight: request.current_weight,
        target_weight: request.target_weight,
        goal: goal.to_owned(),
        is_active: true,
        created_at: now,
    };
    database.create_progress(&progress).await?;

    info!(user.id = %user_id, progress.id = %progress.id, "Weight progress opened");
    Ok(progress)
}

/// All entries of a user, newest first
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown user.
pub async fn list_progress(
    database: &dyn DatabaseProvider,
    user_id: Uuid,
) -> AppResult<Vec<WeightProgress>> {
    require_user(database, user_id).await?;
    database.list_progress(user_id).await
}

/// Apply a partial update
///
/// # Errors
///
/// Returns `InvalidInput` for an empty update, a validation error for bad
/// values, and `ResourceNotFound` for an unknown entry.
pub async fn update_progress(
    database: &dyn DatabaseProvider,
    progress_id: Uuid,
    update: WeightProgressUpdate,
) -> AppResult<WeightProgress> {
    if update.is_empty() {
        return Err(AppError::invalid_input("No fields to update"));
    }
    if let Some(weight) = update.current_weight {
        validate_weight("current_weight", weight)?;
    }
    if let Some(weight) = update.target_weight {
        validate_weight("target_weight", weight)?;
    }
    if update.goal.as_deref().is_some_and(|g| g.trim().is_empty()) {
        return Err(AppError::missing_field("goal"));
    }

    let existing = database
        .get_progress(progress_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Weight progress {progress_id}")))?;
    if let Some(ended_on) = update.ended_on {
        if ended_on < existing.started_on {
            return Err(AppError::out_of_range(format!(
                "End date {ended_on} is before start date {}",
                existing.started_on
            )));
        }
    }

    let trimmed = WeightProgressUpdate {
        goal: update.goal.map(|g| g.trim().to_owned()),
        ..update
    };
    database
        .update_progress(progress_id, &trimmed)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Weight progress {progress_id}")))
}

/// Delete a progress entry
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown entry.
pub async fn delete_progress(database: &dyn DatabaseProvider, progress_id: Uuid) -> AppResult<()> {
    if !database.delete_progress(progress_id).await? {
        return Err(AppError::not_found(format!("Weight progress {progress_id}")));
    }
    info!(progress.id = %progress_id, "Weight progress deleted");
    Ok(())
}

fn validate_weight(field: &str, value: f64) -> AppResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AppError::out_of_range(format!("{field} must be greater than zero")))
    }
}
