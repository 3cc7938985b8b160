// ABOUTME: User profile business logic: registration, partial updates, and lookups
// ABOUTME: Shared existence check used by every per-user service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use chrono::{DateTime, Utc};
use fitcontrol_core::constants::units::DEFAULT_WEIGHT_UNIT;
use fitcontrol_core::models::{NewUser, User, UserUpdate};
use tracing::info;
use uuid::Uuid;

use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};

const WEIGHT_UNITS: [&str; 2] = ["kg", "lb"];

/// Validate and store a new user
///
/// # Errors
///
/// Returns `MissingRequiredField` / `InvalidFormat` for bad input and
/// `ResourceAlreadyExists` when the e-mail is taken.
pub async fn create_user(
    database: &dyn DatabaseProvider,
    request: NewUser,
    now: DateTime<Utc>,
) -> AppResult<User> {
    let username = request.username.trim();
    if username.is_empty() {
        return Err(AppError::missing_field("username"));
    }
    let email = normalize_email(&request.email)?;
    let weight_unit =
        normalize_weight_unit(request.weight_unit.as_deref().unwrap_or(DEFAULT_WEIGHT_UNIT))?;

    let user = User {
        id: Uuid::new_v4(),
        username: username.to_owned(),
        email,
        weight_unit,
        created_at: now,
    };
    database.create_user(&user).await?;

    info!(user.id = %user.id, "User created");
    Ok(user)
}

/// Load a user or fail with `ResourceNotFound`
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown user.
pub async fn require_user(database: &dyn DatabaseProvider, user_id: Uuid) -> AppResult<User> {
    database
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {user_id}")).with_user_id(user_id))
}

/// Apply a partial update to a user profile
///
/// # Errors
///
/// Returns `InvalidInput` for an empty update, a validation error for bad
/// values, `ResourceNotFound` for an unknown user, and
/// `ResourceAlreadyExists` when the new e-mail is taken.
pub async fn update_user(
    database: &dyn DatabaseProvider,
    user_id: Uuid,
    update: UserUpdate,
) -> AppResult<User> {
    if update.is_empty() {
        return Err(AppError::invalid_input("No fields to update"));
    }
    let username = match update.username.as_deref().map(str::trim) {
        Some("") => return Err(AppError::missing_field("username")),
        other => other.map(str::to_owned),
    };
    let normalized = UserUpdate {
        username,
        email: update.email.as_deref().map(normalize_email).transpose()?,
        weight_unit: update
            .weight_unit
            .as_deref()
            .map(normalize_weight_unit)
            .transpose()?,
    };

    let user = database
        .update_user(user_id, &normalized)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {user_id}")).with_user_id(user_id))?;

    info!(user.id = %user.id, "User updated");
    Ok(user)
}

fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::missing_field("email"));
    }
    if !is_plausible_email(&email) {
        return Err(AppError::invalid_format(format!("Invalid e-mail address: {email}")));
    }
    Ok(email)
}

fn normalize_weight_unit(raw: &str) -> AppResult<String> {
    let weight_unit = raw.trim().to_lowercase();
    if WEIGHT_UNITS.contains(&weight_unit.as_str()) {
        Ok(weight_unit)
    } else {
        Err(AppError::invalid_input(format!(
            "Unsupported weight unit: {weight_unit}"
        )))
    }
}

fn is_plausible_email(email: &str) -> bool {
    email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    })
}
