// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Defaults for adherence tracking, energy estimates, networking, and units
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Adherence engine defaults
pub mod adherence {
    /// Fixed offset applied to the current UTC instant to obtain "today"
    pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -6;
    /// Days examined by the streak walk, today included
    pub const DEFAULT_STREAK_LOOKBACK_DAYS: u32 = 90;
    /// Width of the rolling calendar, ending at today
    pub const DEFAULT_CALENDAR_DAYS: u32 = 35;
    /// Concurrent record creations during today's reconciliation
    pub const DEFAULT_RECONCILIATION_CONCURRENCY: usize = 4;
    /// Smallest accepted UTC offset in hours
    pub const MIN_UTC_OFFSET_HOURS: i32 = -12;
    /// Largest accepted UTC offset in hours
    pub const MAX_UTC_OFFSET_HOURS: i32 = 14;
    /// Storage format for calendar dates
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Mifflin-St Jeor energy expenditure constants
pub mod energy {
    /// Weight coefficient (kcal per kg)
    pub const WEIGHT_COEFFICIENT: f64 = 10.0;
    /// Height coefficient (kcal per cm)
    pub const HEIGHT_COEFFICIENT: f64 = 6.25;
    /// Age coefficient (kcal per year)
    pub const AGE_COEFFICIENT: f64 = 5.0;
    /// Sex offset for men
    pub const MALE_OFFSET: f64 = 5.0;
    /// Sex offset for women
    pub const FEMALE_OFFSET: f64 = -161.0;
    /// Multiplier applied to maintenance for a caloric deficit
    pub const DEFICIT_FACTOR: f64 = 0.85;
    /// Multiplier applied to maintenance for a caloric surplus
    pub const SURPLUS_FACTOR: f64 = 1.15;
    /// Sedentary activity factor
    pub const MIN_ACTIVITY_FACTOR: f64 = 1.2;
    /// Extremely active activity factor
    pub const MAX_ACTIVITY_FACTOR: f64 = 1.9;
    /// Height (5 ft) above which ideal weight is computed
    pub const IDEAL_WEIGHT_BASE_HEIGHT_CM: f64 = 152.4;
    /// Centimetres per inch
    pub const CM_PER_INCH: f64 = 2.54;
    /// Ideal weight added per inch above the base height
    pub const IDEAL_WEIGHT_KG_PER_INCH: f64 = 2.3;
    /// Ideal weight at base height for men
    pub const IDEAL_WEIGHT_MALE_BASE_KG: f64 = 50.0;
    /// Ideal weight at base height for women
    pub const IDEAL_WEIGHT_FEMALE_BASE_KG: f64 = 45.5;
    /// Oldest accepted age
    pub const MAX_AGE_YEARS: u32 = 120;
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 3001;
}

/// API endpoints
pub mod endpoints {
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
    /// Readiness endpoint
    pub const READY_CHECK: &str = "/ready";
    /// API base path
    pub const API_BASE: &str = "/api";
}

/// Measurement units
pub mod units {
    /// Weight unit assumed when a user has none recorded
    pub const DEFAULT_WEIGHT_UNIT: &str = "kg";
}

/// Service identity
pub mod service {
    /// Service name reported in logs and health checks
    pub const SERVICE_NAME: &str = "fitcontrol-server";
}
