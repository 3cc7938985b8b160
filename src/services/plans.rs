// ABOUTME: Plan business logic: building plans from payloads, replacing schedules, activation, meal totals
// ABOUTME: Assigns identifiers and positions, keeping unit ids stable across schedule edits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use fitcontrol_core::models::{
    NewPlan, NewScheduledUnit, NutritionSummary, Plan, PlanActivity, PlanDomain, ScheduledUnit,
    WeekdayLabel,
};
use fitcontrol_intelligence::algorithms::summarize_meal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::users::require_user;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};

/// Replacement schedule for an existing plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReplacement {
    /// New plan name
    pub name: String,
    /// Full new schedule
    #[serde(default)]
    pub units: Vec<NewScheduledUnit>,
}

/// Validate and store a new plan
///
/// # Errors
///
/// Returns a validation error for bad input and `ResourceNotFound` when the
/// owner does not exist.
pub async fn create_plan(
    database: &dyn DatabaseProvider,
    request: NewPlan,
    now: DateTime<Utc>,
) -> AppResult<Plan> {
    request.validate()?;
    require_user(database, request.user_id).await?;

    let plan = build_plan(request, now);
    database.create_plan(&plan).await?;

    info!(
        plan.id = %plan.id,
        user.id = %plan.user_id,
        plan.domain = %plan.domain,
        units = plan.units.len(),
        "Plan created"
    );
    Ok(plan)
}

/// Load a plan or fail with `ResourceNotFound`
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown plan.
pub async fn require_plan(database: &dyn DatabaseProvider, plan_id: Uuid) -> AppResult<Plan> {
    database
        .get_plan(plan_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Plan {plan_id}")).with_resource_id(plan_id.to_string()))
}

/// List a user's plans
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown user.
pub async fn list_plans(
    database: &dyn DatabaseProvider,
    user_id: Uuid,
    domain: Option<PlanDomain>,
) -> AppResult<Vec<Plan>> {
    require_user(database, user_id).await?;
    database.list_plans(user_id, domain).await
}

/// Replace the name and schedule of a plan
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown plan and a validation error for
/// bad input.
pub async fn replace_plan(
    database: &dyn DatabaseProvider,
    plan_id: Uuid,
    replacement: PlanReplacement,
) -> AppResult<Plan> {
    let existing = require_plan(database, plan_id).await?;

    let request = NewPlan {
        user_id: existing.user_id,
        domain: existing.domain,
        name: replacement.name,
        activate: existing.is_active,
        units: replacement.units,
    };
    request.validate()?;

    let plan = rebuild_plan(&existing, request);
    database.replace_plan(&plan).await?;

    info!(plan.id = %plan.id, units = plan.units.len(), "Plan replaced");
    Ok(plan)
}

/// Make a plan the active one of its user and domain
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown plan.
pub async fn activate_plan(database: &dyn DatabaseProvider, plan_id: Uuid) -> AppResult<Plan> {
    require_plan(database, plan_id).await?;
    database.activate_plan(plan_id).await?;
    info!(plan.id = %plan_id, "Plan activated");
    require_plan(database, plan_id).await
}

/// Delete a plan and its compliance records
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown plan.
pub async fn delete_plan(database: &dyn DatabaseProvider, plan_id: Uuid) -> AppResult<()> {
    if !database.delete_plan(plan_id).await? {
        return Err(AppError::not_found(format!("Plan {plan_id}")));
    }
    info!(plan.id = %plan_id, "Plan deleted");
    Ok(())
}

/// Nutritional totals of one meal slot of a diet plan
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown plan or a unit outside it, and
/// `InvalidInput` when the plan is a routine.
pub async fn meal_nutrition(
    database: &dyn DatabaseProvider,
    plan_id: Uuid,
    unit_id: Uuid,
) -> AppResult<NutritionSummary> {
    let plan = require_plan(database, plan_id).await?;
    if plan.domain != PlanDomain::Diet {
        return Err(AppError::invalid_input(format!(
            "Plan {plan_id} is not a diet plan"
        )));
    }
    let unit = plan
        .units
        .iter()
        .find(|unit| unit.id == unit_id)
        .ok_or_else(|| AppError::not_found(format!("Meal {unit_id} in plan {plan_id}")))?;
    Ok(summarize_meal(unit))
}

/// Assign fresh identifiers and positions to a validated payload
#[must_use]
pub fn build_plan(request: NewPlan, now: DateTime<Utc>) -> Plan {
    let plan_id = Uuid::new_v4();
    let units = assemble_units(plan_id, request.units, |_, _| Uuid::new_v4());
    Plan {
        id: plan_id,
        user_id: request.user_id,
        domain: request.domain,
        name: request.name.trim().to_owned(),
        is_active: request.activate,
        created_at: now,
        units,
    }
}

/// Apply a validated payload to `existing`
///
/// A unit keeps its identifier when the old schedule had a unit on the same
/// weekday at the same position, so compliance history stays attached.
#[must_use]
pub fn rebuild_plan(existing: &Plan, request: NewPlan) -> Plan {
    let previous: HashMap<(WeekdayLabel, u32), Uuid> = existing
        .units
        .iter()
        .map(|unit| ((unit.weekday, unit.position), unit.id))
        .collect();

    let units = assemble_units(existing.id, request.units, |weekday, position| {
        previous
            .get(&(weekday, position))
            .copied()
            .unwrap_or_else(Uuid::new_v4)
    });

    Plan {
        id: existing.id,
        user_id: existing.user_id,
        domain: existing.domain,
        name: request.name.trim().to_owned(),
        is_active: existing.is_active,
        created_at: existing.created_at,
        units,
    }
}

/// Positions count up from 0 within each weekday, in payload order
fn assemble_units<F>(plan_id: Uuid, units: Vec<NewScheduledUnit>, mut unit_id: F) -> Vec<ScheduledUnit>
where
    F: FnMut(WeekdayLabel, u32) -> Uuid,
{
    let mut next_position: HashMap<WeekdayLabel, u32> = HashMap::new();
    let mut assembled: Vec<ScheduledUnit> = units
        .into_iter()
        .map(|unit| {
            let slot = next_position.entry(unit.weekday).or_insert(0);
            let position = *slot;
            *slot += 1;

            let id = unit_id(unit.weekday, position);
            let activities = unit
                .activities
                .into_iter()
                .zip(0_u32..)
                .map(|(activity, index)| PlanActivity {
                    id: Uuid::new_v4(),
                    unit_id: id,
                    name: activity.name.trim().to_owned(),
                    position: index,
                    details: activity.details,
                })
                .collect();

            ScheduledUnit {
                id,
                plan_id,
                weekday: unit.weekday,
                label: unit.label.map(|l| l.trim().to_owned()).filter(|l| !l.is_empty()),
                scheduled_time: unit.scheduled_time,
                position,
                activities,
            }
        })
        .collect();
    assembled.sort_by_key(|unit| (unit.weekday.index(), unit.position));
    assembled
}
