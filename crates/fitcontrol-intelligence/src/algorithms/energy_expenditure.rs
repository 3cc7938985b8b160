// ABOUTME: Energy expenditure estimation using the Mifflin-St Jeor equation
// ABOUTME: Derives BMR, maintenance, deficit and surplus calories, and ideal body weight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! # Energy Expenditure
//!
//! Basal metabolic rate follows Mifflin-St Jeor:
//!
//! - Men: `BMR = 10 x kg + 6.25 x cm - 5 x age + 5`
//! - Women: `BMR = 10 x kg + 6.25 x cm - 5 x age - 161`
//!
//! Maintenance is `BMR x activity factor`; deficit and surplus targets are
//! 85% and 115% of maintenance. Ideal weight uses the Devine-style estimate
//! (50 kg men, 45.5 kg women, plus 2.3 kg per inch above five feet).
//!
//! Every step rounds to a whole number before feeding the next one.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). "A new predictive equation for resting energy
//!   expenditure in healthy individuals." *Am J Clin Nutr*, 51(2), 241-247.
//! - Devine, B.J. (1974). "Gentamicin therapy." *Drug Intell Clin Pharm*, 8, 650-655.

use fitcontrol_core::constants::energy::{
    AGE_COEFFICIENT, CM_PER_INCH, DEFICIT_FACTOR, FEMALE_OFFSET, HEIGHT_COEFFICIENT,
    IDEAL_WEIGHT_BASE_HEIGHT_CM, IDEAL_WEIGHT_FEMALE_BASE_KG, IDEAL_WEIGHT_KG_PER_INCH,
    IDEAL_WEIGHT_MALE_BASE_KG, MALE_OFFSET, MAX_ACTIVITY_FACTOR, MAX_AGE_YEARS,
    MIN_ACTIVITY_FACTOR, SURPLUS_FACTOR, WEIGHT_COEFFICIENT,
};
use fitcontrol_core::errors::{AppError, AppResult};
use fitcontrol_core::models::{BiologicalSex, EnergyEstimate, EnergyInputs};

/// Compute calorie targets and ideal weight
///
/// # Errors
///
/// Returns `ValueOutOfRange` when an input is outside its physiological range
/// or the resulting BMR is not positive.
pub fn estimate_energy(inputs: &EnergyInputs) -> AppResult<EnergyEstimate> {
    validate_inputs(inputs)?;

    let bmr = basal_metabolic_rate(inputs).round();
    if bmr <= 0.0 {
        return Err(AppError::out_of_range(format!(
            "Inputs yield a non-positive BMR ({bmr})"
        )));
    }

    let maintenance_calories = (bmr * inputs.activity_factor).round();

    Ok(EnergyEstimate {
        bmr,
        maintenance_calories,
        deficit_calories: (maintenance_calories * DEFICIT_FACTOR).round(),
        surplus_calories: (maintenance_calories * SURPLUS_FACTOR).round(),
        ideal_weight_kg: ideal_weight_kg(inputs.sex, inputs.height_cm).round(),
    })
}

fn basal_metabolic_rate(inputs: &EnergyInputs) -> f64 {
    let sex_offset = match inputs.sex {
        BiologicalSex::Male => MALE_OFFSET,
        BiologicalSex::Female => FEMALE_OFFSET,
    };
    AGE_COEFFICIENT.mul_add(
        -f64::from(inputs.age),
        WEIGHT_COEFFICIENT.mul_add(
            inputs.weight_kg,
            HEIGHT_COEFFICIENT * inputs.height_cm,
        ),
    ) + sex_offset
}

fn ideal_weight_kg(sex: BiologicalSex, height_cm: f64) -> f64 {
    if height_cm <= IDEAL_WEIGHT_BASE_HEIGHT_CM {
        return 0.0;
    }
    let base = match sex {
        BiologicalSex::Male => IDEAL_WEIGHT_MALE_BASE_KG,
        BiologicalSex::Female => IDEAL_WEIGHT_FEMALE_BASE_KG,
    };
    let inches_over = (height_cm - IDEAL_WEIGHT_BASE_HEIGHT_CM) / CM_PER_INCH;
    IDEAL_WEIGHT_KG_PER_INCH.mul_add(inches_over, base)
}

fn validate_inputs(inputs: &EnergyInputs) -> AppResult<()> {
    if inputs.age == 0 || inputs.age > MAX_AGE_YEARS {
        return Err(AppError::out_of_range(format!(
            "Age must be between 1 and {MAX_AGE_YEARS}, got {}",
            inputs.age
        )));
    }
    if !(inputs.height_cm.is_finite() && inputs.height_cm > 0.0) {
        return Err(AppError::out_of_range("Height must be a positive number"));
    }
    if !(inputs.weight_kg.is_finite() && inputs.weight_kg > 0.0) {
        return Err(AppError::out_of_range("Weight must be a positive number"));
    }
    if !(MIN_ACTIVITY_FACTOR..=MAX_ACTIVITY_FACTOR).contains(&inputs.activity_factor) {
        return Err(AppError::out_of_range(format!(
            "Activity factor must be within {MIN_ACTIVITY_FACTOR}..={MAX_ACTIVITY_FACTOR}, got {}",
            inputs.activity_factor
        )));
    }
    Ok(())
}
