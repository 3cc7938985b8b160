// ABOUTME: Route module organization for FitControl HTTP endpoints
// ABOUTME: Route definitions grouped by domain with thin handlers delegating to services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! Route module for the `FitControl` server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Streak, calendar, and today's tracker
pub mod adherence;
/// Compliance records
pub mod compliance;
/// Dashboard summary
pub mod dashboard;
/// Energy expenditure profiles
pub mod energy;
/// Extractors with JSON error rejections
pub mod extract;
/// Health check and readiness
pub mod health;
/// Routine and diet plans
pub mod plans;
/// Weight progress
pub mod progress;
/// User profiles
pub mod users;

pub use adherence::AdherenceRoutes;
pub use compliance::ComplianceRoutes;
pub use dashboard::DashboardRoutes;
pub use energy::EnergyRoutes;
pub use health::HealthRoutes;
pub use plans::PlanRoutes;
pub use progress::ProgressRoutes;
pub use users::UserRoutes;
