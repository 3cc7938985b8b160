// ABOUTME: Nutritional totals of a diet meal slot
// ABOUTME: Sums of calories, macronutrients, and portion weight across its foods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use serde::{Deserialize, Serialize};

/// Macronutrient totals for one meal slot; all zero when it has no foods
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    /// Total energy in kcal
    pub total_calories: f64,
    /// Total protein in grams
    pub total_protein_g: f64,
    /// Total fat in grams
    pub total_fat_g: f64,
    /// Total carbohydrates in grams
    pub total_carbs_g: f64,
    /// Total portion weight in grams
    pub total_grams: f64,
}
