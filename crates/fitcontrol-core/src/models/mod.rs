// ABOUTME: Core data models for the FitControl backend
// ABOUTME: Re-exports plans, weekdays, compliance records, calendar days, users, progress, energy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! # Data Models
//!
//! Plans (routines and diets) are organized by weekday into scheduled units
//! (routine days or meal slots), each holding an ordered list of activities.
//! Compliance records track whether a scheduled unit, or a whole diet day,
//! was completed on a given calendar date.

mod calendar;
mod compliance;
mod energy;
mod nutrition;
mod plan;
mod progress;
mod user;
mod weekday;

pub use calendar::{CalendarDay, CalendarStatus};
pub use compliance::{AnchorKind, ComplianceAnchor, ComplianceKey, ComplianceRecord};
pub use energy::{BiologicalSex, EnergyEstimate, EnergyInputs, EnergyProfile};
pub use nutrition::NutritionSummary;
pub use plan::{
    ActivityDetails, NewPlan, NewPlanActivity, NewScheduledUnit, Plan, PlanActivity, PlanDomain,
    ScheduledUnit,
};
pub use progress::{NewWeightProgress, WeightProgress, WeightProgressUpdate};
pub use user::{NewUser, User, UserUpdate};
pub use weekday::WeekdayLabel;
