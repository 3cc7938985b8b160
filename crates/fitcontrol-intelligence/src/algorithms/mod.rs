// ABOUTME: Fitness algorithms module
// ABOUTME: Energy expenditure estimation and meal-slot nutritional totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

/// Mifflin-St Jeor energy expenditure and ideal weight
pub mod energy_expenditure;
/// Nutritional totals per meal slot
pub mod nutrition;

pub use energy_expenditure::estimate_energy;
pub use nutrition::summarize_meal;
