// ABOUTME: Weight progress entries recording current and target body weight
// ABOUTME: The active entry feeds the dashboard summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A weight-goal period for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightProgress {
    /// Entry identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Period start
    pub started_on: NaiveDate,
    /// Period end, if closed
    pub ended_on: Option<NaiveDate>,
    /// Latest measured weight
    pub current_weight: f64,
    /// Goal weight
    pub target_weight: f64,
    /// Free-form goal ("lose fat", "gain muscle", ...)
    pub goal: String,
    /// Whether this is the entry in effect
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Payload for opening a weight-goal period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWeightProgress {
    /// Period start; today when omitted
    #[serde(default)]
    pub started_on: Option<NaiveDate>,
    /// Latest measured weight
    pub current_weight: f64,
    /// Goal weight
    pub target_weight: f64,
    /// Free-form goal
    pub goal: String,
}

/// Partial update of a weight-goal period
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightProgressUpdate {
    /// Period end
    #[serde(default)]
    pub ended_on: Option<NaiveDate>,
    /// Latest measured weight
    #[serde(default)]
    pub current_weight: Option<f64>,
    /// Goal weight
    #[serde(default)]
    pub target_weight: Option<f64>,
    /// Free-form goal
    #[serde(default)]
    pub goal: Option<String>,
    /// Whether the entry is in effect
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl WeightProgressUpdate {
    /// True when no field would change
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ended_on.is_none()
            && self.current_weight.is_none()
            && self.target_weight.is_none()
            && self.goal.is_none()
            && self.is_active.is_none()
    }
}
