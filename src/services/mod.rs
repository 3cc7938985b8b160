// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Protocol-agnostic operations over the record store and the adherence engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! Domain service layer
//!
//! Route handlers parse and render; everything else lives here. Services take
//! the record store as `&dyn DatabaseProvider` so tests can hand in doubles.

/// Streak, calendar, and today's tracker
pub mod adherence;

/// Compliance record lookups and completion toggling
pub mod compliance;

/// Dashboard and profile summaries
pub mod dashboard;

/// Energy expenditure profiles
pub mod energy;

/// Plan creation, replacement, activation, deletion, meal totals
pub mod plans;

/// Weight progress entries
pub mod progress;

/// User registration, updates, and lookups
pub mod users;

pub use adherence::{AdherenceService, ReconciledUnit, TodayTracker};
pub use dashboard::{DashboardSummary, ProfileSummary};
pub use plans::PlanReplacement;
