// ABOUTME: Nutritional totals of a diet meal slot
// ABOUTME: Folds the food entries of a scheduled unit into calorie and macronutrient sums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use fitcontrol_core::models::{ActivityDetails, NutritionSummary, ScheduledUnit};

/// Sum the foods of a meal slot
///
/// Exercise entries contribute nothing, so a routine day or an empty slot
/// yields all zeros.
#[must_use]
pub fn summarize_meal(unit: &ScheduledUnit) -> NutritionSummary {
    unit.activities
        .iter()
        .fold(NutritionSummary::default(), |mut acc, activity| {
            if let ActivityDetails::Food {
                calories,
                protein_g,
                fat_g,
                carbs_g,
                grams,
                ..
            } = &activity.details
            {
                acc.total_calories += calories;
                acc.total_protein_g += protein_g;
                acc.total_fat_g += fat_g;
                acc.total_carbs_g += carbs_g;
                acc.total_grams += grams;
            }
            acc
        })
}
