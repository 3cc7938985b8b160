// ABOUTME: Energy expenditure inputs and derived calorie targets
// ABOUTME: One profile per user, recomputed whenever the inputs change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Sex used by the Mifflin-St Jeor equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    /// Male coefficients
    #[serde(alias = "hombre", alias = "masculino")]
    Male,
    /// Female coefficients
    #[serde(alias = "mujer", alias = "femenino")]
    Female,
}

impl BiologicalSex {
    /// Storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiologicalSex {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "hombre" | "masculino" => Ok(Self::Male),
            "female" | "mujer" | "femenino" => Ok(Self::Female),
            _ => Err(AppError::invalid_format(format!("Unknown sex: {s}"))),
        }
    }
}

/// Body measurements and activity level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyInputs {
    /// Sex
    pub sex: BiologicalSex,
    /// Age in years
    pub age: u32,
    /// Height in centimetres
    pub height_cm: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Activity multiplier (1.2 sedentary .. 1.9 extremely active)
    pub activity_factor: f64,
}

/// Derived daily calorie targets, all rounded to whole units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyEstimate {
    /// Basal metabolic rate (kcal)
    pub bmr: f64,
    /// Maintenance calories (kcal)
    pub maintenance_calories: f64,
    /// Deficit target (kcal)
    pub deficit_calories: f64,
    /// Surplus target (kcal)
    pub surplus_calories: f64,
    /// Ideal body weight (kg); 0 at or below 152.4 cm
    pub ideal_weight_kg: f64,
}

/// Stored energy profile of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyProfile {
    /// Owner
    pub user_id: Uuid,
    /// Inputs the estimate was computed from
    #[serde(flatten)]
    pub inputs: EnergyInputs,
    /// Computed targets
    #[serde(flatten)]
    pub estimate: EnergyEstimate,
    /// Last recomputation
    pub updated_at: DateTime<Utc>,
}
