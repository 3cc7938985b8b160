// ABOUTME: Compliance record models tracking completion of scheduled work per date
// ABOUTME: Records are anchored on a scheduled unit or on a whole plan (diet day)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PlanDomain;
use crate::errors::AppError;

/// What a compliance record is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorKind {
    /// A single routine day or meal slot
    Unit,
    /// A whole plan; used for day-level diet records
    Plan,
}

impl AnchorKind {
    /// Storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Plan => "plan",
        }
    }
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnchorKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unit" => Ok(Self::Unit),
            "plan" => Ok(Self::Plan),
            _ => Err(AppError::invalid_format(format!("Unknown anchor kind: {s}"))),
        }
    }
}

/// Anchor of a compliance record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComplianceAnchor {
    /// Unit or plan
    pub kind: AnchorKind,
    /// Identifier of the anchored unit or plan
    pub id: Uuid,
}

impl ComplianceAnchor {
    /// Anchor on a scheduled unit
    #[must_use]
    pub const fn unit(id: Uuid) -> Self {
        Self {
            kind: AnchorKind::Unit,
            id,
        }
    }

    /// Anchor on a whole plan
    #[must_use]
    pub const fn plan(id: Uuid) -> Self {
        Self {
            kind: AnchorKind::Plan,
            id,
        }
    }
}

/// Unique key of a compliance record: `(user, anchor, due_date)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComplianceKey {
    /// Owner
    pub user_id: Uuid,
    /// Anchored unit or plan
    pub anchor: ComplianceAnchor,
    /// Calendar date in the user's local offset
    pub due_date: NaiveDate,
}

impl ComplianceKey {
    /// Build a key
    #[must_use]
    pub const fn new(user_id: Uuid, anchor: ComplianceAnchor, due_date: NaiveDate) -> Self {
        Self {
            user_id,
            anchor,
            due_date,
        }
    }
}

/// Persisted completion flag for one anchor on one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    /// Record identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Routine or diet
    pub domain: PlanDomain,
    /// Anchored unit or plan
    pub anchor: ComplianceAnchor,
    /// Calendar date
    pub due_date: NaiveDate,
    /// Completion flag; created `false`
    pub completed: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last completion change
    pub updated_at: DateTime<Utc>,
}

impl ComplianceRecord {
    /// Fresh, not-yet-completed record for `key`
    #[must_use]
    pub fn pending(key: ComplianceKey, domain: PlanDomain, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: key.user_id,
            domain,
            anchor: key.anchor,
            due_date: key.due_date,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Unique key of this record
    #[must_use]
    pub const fn key(&self) -> ComplianceKey {
        ComplianceKey::new(self.user_id, self.anchor, self.due_date)
    }
}
