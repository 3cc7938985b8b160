// ABOUTME: Dashboard and profile summaries combining both streaks with the active weight goal
// ABOUTME: One call per domain to the adherence service plus the active progress entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use chrono::NaiveDate;
use fitcontrol_core::models::{PlanDomain, User, WeightProgress};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::adherence::AdherenceService;
use super::users::require_user;
use crate::database_plugins::DatabaseProvider;
use crate::errors::AppResult;

/// Home screen summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Display name
    pub username: String,
    /// Routine streak
    pub routine_streak: u32,
    /// Diet streak
    pub diet_streak: u32,
    /// Weight from the active progress entry
    pub current_weight: Option<f64>,
    /// Goal weight from the active progress entry
    pub target_weight: Option<f64>,
    /// Unit of both weights
    pub weight_unit: String,
}

/// Profile screen: identity, current weight, and both streaks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// Display name
    pub username: String,
    /// E-mail address
    pub email: String,
    /// Preferred weight unit
    pub weight_unit: String,
    /// Weight from the active progress entry
    pub current_weight: Option<f64>,
    /// Routine streak
    pub routine_streak: u32,
    /// Diet streak
    pub diet_streak: u32,
}

/// What both summaries read for one user
struct UserSnapshot {
    user: User,
    routine_streak: u32,
    diet_streak: u32,
    progress: Option<WeightProgress>,
}

async fn load_snapshot(
    database: &dyn DatabaseProvider,
    adherence: &AdherenceService,
    user_id: Uuid,
    today: NaiveDate,
) -> AppResult<UserSnapshot> {
    let user = require_user(database, user_id).await?;
    let routine_streak = adherence
        .streak_on(user_id, PlanDomain::Routine, today)
        .await?;
    let diet_streak = adherence.streak_on(user_id, PlanDomain::Diet, today).await?;
    let progress = database.get_active_progress(user_id).await?;

    Ok(UserSnapshot {
        user,
        routine_streak,
        diet_streak,
        progress,
    })
}

/// Build the dashboard of `user_id` as seen on `today`
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown user.
pub async fn get_dashboard(
    database: &dyn DatabaseProvider,
    adherence: &AdherenceService,
    user_id: Uuid,
    today: NaiveDate,
) -> AppResult<DashboardSummary> {
    let snapshot = load_snapshot(database, adherence, user_id, today).await?;
    let progress = snapshot.progress.as_ref();

    Ok(DashboardSummary {
        username: snapshot.user.username,
        routine_streak: snapshot.routine_streak,
        diet_streak: snapshot.diet_streak,
        current_weight: progress.map(|p| p.current_weight),
        target_weight: progress.map(|p| p.target_weight),
        weight_unit: snapshot.user.weight_unit,
    })
}

/// Build the profile of `user_id` as seen on `today`
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown user.
pub async fn get_profile(
    database: &dyn DatabaseProvider,
    adherence: &AdherenceService,
    user_id: Uuid,
    today: NaiveDate,
) -> AppResult<ProfileSummary> {
    let snapshot = load_snapshot(database, adherence, user_id, today).await?;

    Ok(ProfileSummary {
        current_weight: snapshot.progress.map(|p| p.current_weight),
        username: snapshot.user.username,
        email: snapshot.user.email,
        weight_unit: snapshot.user.weight_unit,
        routine_streak: snapshot.routine_streak,
        diet_streak: snapshot.diet_streak,
    })
}
