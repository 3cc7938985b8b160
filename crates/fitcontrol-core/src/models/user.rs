// ABOUTME: User profile model referenced by plans, compliance, and progress
// ABOUTME: Authentication data lives outside this backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    pub id: Uuid,
    /// Display name
    pub username: String,
    /// Unique e-mail address
    pub email: String,
    /// Preferred weight unit (`kg` unless set)
    pub weight_unit: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name
    pub username: String,
    /// Unique e-mail address
    pub email: String,
    /// Preferred weight unit
    #[serde(default)]
    pub weight_unit: Option<String>,
}

/// Partial update of a user profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    /// Display name
    #[serde(default)]
    pub username: Option<String>,
    /// Unique e-mail address
    #[serde(default)]
    pub email: Option<String>,
    /// Preferred weight unit
    #[serde(default)]
    pub weight_unit: Option<String>,
}

impl UserUpdate {
    /// True when no field would change
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.weight_unit.is_none()
    }
}
