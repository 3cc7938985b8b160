// ABOUTME: Plan models for routines and diets organized by weekday
// ABOUTME: Defines Plan, ScheduledUnit, PlanActivity, and their creation payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WeekdayLabel;
use crate::errors::{AppError, AppResult};

/// Which kind of plan a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanDomain {
    /// Workout routine; units are routine days
    #[serde(alias = "rutina")]
    Routine,
    /// Diet; units are meal slots
    #[serde(alias = "dieta")]
    Diet,
}

impl PlanDomain {
    /// Storage and wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Routine => "routine",
            Self::Diet => "diet",
        }
    }
}

impl fmt::Display for PlanDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanDomain {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "routine" | "rutina" => Ok(Self::Routine),
            "diet" | "dieta" => Ok(Self::Diet),
            _ => Err(AppError::invalid_format(format!("Unknown plan domain: {s}"))),
        }
    }
}

/// A user's routine or diet template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Plan identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Routine or diet
    pub domain: PlanDomain,
    /// Display name
    pub name: String,
    /// Only one plan per user and domain is active
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Units ordered by weekday index, then position
    pub units: Vec<ScheduledUnit>,
}

impl Plan {
    /// Units scheduled on `weekday`, in position order
    pub fn units_on(&self, weekday: WeekdayLabel) -> impl Iterator<Item = &ScheduledUnit> {
        self.units.iter().filter(move |unit| unit.weekday == weekday)
    }
}

/// One plan entry tied to a weekday: a routine day or a meal slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledUnit {
    /// Unit identifier, also the compliance anchor for unit-level records
    pub id: Uuid,
    /// Owning plan
    pub plan_id: Uuid,
    /// Day of the week
    pub weekday: WeekdayLabel,
    /// Meal name or routine day title
    pub label: Option<String>,
    /// Scheduled time as `HH:MM`
    pub scheduled_time: Option<String>,
    /// Order within the weekday
    pub position: u32,
    /// Exercises or foods
    pub activities: Vec<PlanActivity>,
}

impl ScheduledUnit {
    /// Whether this unit has anything to do; empty units never count as active
    #[must_use]
    pub fn has_activities(&self) -> bool {
        !self.activities.is_empty()
    }
}

/// A single exercise or food entry in a scheduled unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanActivity {
    /// Activity identifier
    pub id: Uuid,
    /// Owning unit
    pub unit_id: Uuid,
    /// Exercise or food name
    pub name: String,
    /// Order within the unit
    pub position: u32,
    /// Domain-specific details
    pub details: ActivityDetails,
}

/// Domain-specific payload of an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityDetails {
    /// Strength exercise prescription
    Exercise {
        /// Reference into the exercise catalogue
        #[serde(default)]
        exercise_id: Option<i64>,
        /// Number of sets
        sets: u32,
        /// Repetitions per set
        repetitions: u32,
        /// Load in kilograms
        #[serde(default)]
        weight_kg: Option<f64>,
    },
    /// Food portion with macronutrients
    Food {
        /// Food category
        food_type: String,
        /// Energy in kcal
        calories: f64,
        /// Protein in grams
        protein_g: f64,
        /// Fat in grams
        fat_g: f64,
        /// Carbohydrates in grams
        carbs_g: f64,
        /// Portion size in grams
        grams: f64,
    },
}

impl ActivityDetails {
    /// Domain this payload belongs to
    #[must_use]
    pub const fn domain(&self) -> PlanDomain {
        match self {
            Self::Exercise { .. } => PlanDomain::Routine,
            Self::Food { .. } => PlanDomain::Diet,
        }
    }

    fn validate(&self) -> AppResult<()> {
        match self {
            Self::Exercise {
                sets,
                repetitions,
                weight_kg,
                ..
            } => {
                if *sets == 0 || *repetitions == 0 {
                    return Err(AppError::out_of_range(
                        "Exercise sets and repetitions must be positive",
                    ));
                }
                if weight_kg.is_some_and(|w| w < 0.0 || !w.is_finite()) {
                    return Err(AppError::out_of_range("Exercise weight must be non-negative"));
                }
            }
            Self::Food {
                food_type,
                calories,
                protein_g,
                fat_g,
                carbs_g,
                grams,
            } => {
                if food_type.trim().is_empty() {
                    return Err(AppError::missing_field("food_type"));
                }
                let amounts = [*calories, *protein_g, *fat_g, *carbs_g, *grams];
                if amounts.iter().any(|v| *v < 0.0 || !v.is_finite()) {
                    return Err(AppError::out_of_range(
                        "Food nutrients and grams must be non-negative",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Payload for creating a full plan in one call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlan {
    /// Owner
    pub user_id: Uuid,
    /// Routine or diet
    pub domain: PlanDomain,
    /// Display name
    pub name: String,
    /// Make this the active plan, deactivating the others
    #[serde(default = "default_activate")]
    pub activate: bool,
    /// Scheduled units
    #[serde(default)]
    pub units: Vec<NewScheduledUnit>,
}

const fn default_activate() -> bool {
    true
}

/// Scheduled unit inside a [`NewPlan`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewScheduledUnit {
    /// Day of the week
    pub weekday: WeekdayLabel,
    /// Meal name or routine day title
    #[serde(default)]
    pub label: Option<String>,
    /// Scheduled time as `HH:MM`
    #[serde(default)]
    pub scheduled_time: Option<String>,
    /// Exercises or foods, in order
    #[serde(default)]
    pub activities: Vec<NewPlanActivity>,
}

/// Activity inside a [`NewScheduledUnit`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlanActivity {
    /// Exercise or food name
    pub name: String,
    /// Domain-specific details
    pub details: ActivityDetails,
}

impl NewPlan {
    /// Validate names, times, and that every activity matches the plan domain
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField`, `InvalidFormat`, `InvalidInput`, or
    /// `ValueOutOfRange` describing the first offending field.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }
        for unit in &self.units {
            if let Some(time) = &unit.scheduled_time {
                NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| {
                    AppError::invalid_format(format!("Scheduled time must be HH:MM, got {time}"))
                })?;
            }
            for activity in &unit.activities {
                if activity.name.trim().is_empty() {
                    return Err(AppError::missing_field("activities[].name"));
                }
                if activity.details.domain() != self.domain {
                    return Err(AppError::invalid_input(format!(
                        "Activity '{}' does not belong to a {} plan",
                        activity.name, self.domain
                    )));
                }
                activity.details.validate()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn breakfast(details: ActivityDetails) -> NewPlan {
        NewPlan {
            user_id: Uuid::new_v4(),
            domain: PlanDomain::Diet,
            name: "Cut".to_owned(),
            activate: true,
            units: vec![NewScheduledUnit {
                weekday: WeekdayLabel::Monday,
                label: Some("Desayuno".to_owned()),
                scheduled_time: Some("07:30".to_owned()),
                activities: vec![NewPlanActivity {
                    name: "Avena".to_owned(),
                    details,
                }],
            }],
        }
    }

    fn oats() -> ActivityDetails {
        ActivityDetails::Food {
            food_type: "cereal".to_owned(),
            calories: 150.0,
            protein_g: 5.0,
            fat_g: 3.0,
            carbs_g: 27.0,
            grams: 40.0,
        }
    }

    #[test]
    fn test_domain_parses_localized_names() {
        assert_eq!("rutina".parse::<PlanDomain>().unwrap(), PlanDomain::Routine);
        assert_eq!("Diet".parse::<PlanDomain>().unwrap(), PlanDomain::Diet);
        assert_eq!(
            "cardio".parse::<PlanDomain>().unwrap_err().code,
            ErrorCode::InvalidFormat
        );
    }

    #[test]
    fn test_valid_diet_plan_passes() {
        assert!(breakfast(oats()).validate().is_ok());
    }

    #[test]
    fn test_exercise_in_diet_plan_is_rejected() {
        let plan = breakfast(ActivityDetails::Exercise {
            exercise_id: None,
            sets: 3,
            repetitions: 10,
            weight_kg: None,
        });
        assert_eq!(plan.validate().unwrap_err().code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_bad_time_is_invalid_format() {
        let mut plan = breakfast(oats());
        plan.units[0].scheduled_time = Some("7h30".to_owned());
        assert_eq!(plan.validate().unwrap_err().code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_activate_defaults_to_true() {
        let json = serde_json::json!({
            "user_id": Uuid::new_v4(),
            "domain": "rutina",
            "name": "Push Pull Legs",
        });
        let plan: NewPlan = serde_json::from_value(json).unwrap();
        assert!(plan.activate);
        assert_eq!(plan.domain, PlanDomain::Routine);
        assert!(plan.units.is_empty());
    }
}
