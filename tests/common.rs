// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory store, user, plan, and adherence service helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `fitcontrol_server`

use std::env;
use std::sync::{Arc, Once};

use anyhow::Result;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fitcontrol_server::config::DatabaseUrl;
use fitcontrol_server::database_plugins::{DatabaseProvider, SqliteDatabase};
use fitcontrol_server::models::{
    ActivityDetails, NewPlan, NewPlanActivity, NewScheduledUnit, NewUser, Plan, PlanDomain, User,
    WeekdayLabel,
};
use fitcontrol_server::services::{plans, users, AdherenceService};
use fitcontrol_intelligence::{AdherenceConfig, AdherenceEngine};
use tracing::Level;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup: migrated in-memory `SQLite`
pub async fn create_test_database() -> Result<Arc<SqliteDatabase>> {
    init_test_logging();
    let database = SqliteDatabase::new(&DatabaseUrl::Memory, 1).await?;
    database.migrate().await?;
    Ok(Arc::new(database))
}

/// Adherence service at UTC with the default windows
pub fn create_adherence_service(database: Arc<dyn DatabaseProvider>) -> Result<AdherenceService> {
    let config = AdherenceConfig::new(0, 90, 35)?;
    Ok(AdherenceService::new(
        database,
        AdherenceEngine::new(config),
        4,
    ))
}

/// Register a user with a unique e-mail
pub async fn create_test_user(database: &dyn DatabaseProvider, username: &str) -> Result<User> {
    let request = NewUser {
        username: username.to_owned(),
        email: format!("{}.{}@example.com", username.to_lowercase(), Uuid::new_v4().simple()),
        weight_unit: None,
    };
    Ok(users::create_user(database, request, Utc::now()).await?)
}

/// `YYYY-MM-DD` shorthand
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Noon UTC on `date`
pub fn noon(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
}

/// Bench press prescription
pub fn bench_press() -> NewPlanActivity {
    NewPlanActivity {
        name: "Press banca".to_owned(),
        details: ActivityDetails::Exercise {
            exercise_id: Some(1),
            sets: 4,
            repetitions: 8,
            weight_kg: Some(60.0),
        },
    }
}

/// A 40 g oats portion
pub fn oats() -> NewPlanActivity {
    NewPlanActivity {
        name: "Avena".to_owned(),
        details: ActivityDetails::Food {
            food_type: "cereal".to_owned(),
            calories: 150.0,
            protein_g: 5.0,
            fat_g: 3.0,
            carbs_g: 27.0,
            grams: 40.0,
        },
    }
}

/// Routine unit on `weekday` with one exercise
pub fn routine_day(weekday: WeekdayLabel) -> NewScheduledUnit {
    NewScheduledUnit {
        weekday,
        label: Some(format!("{weekday} workout")),
        scheduled_time: None,
        activities: vec![bench_press()],
    }
}

/// Meal slot on `weekday` with one food
pub fn meal(weekday: WeekdayLabel, label: &str, time: &str) -> NewScheduledUnit {
    NewScheduledUnit {
        weekday,
        label: Some(label.to_owned()),
        scheduled_time: Some(time.to_owned()),
        activities: vec![oats()],
    }
}

/// Create an active plan for `user`
pub async fn create_test_plan(
    database: &dyn DatabaseProvider,
    user: &User,
    domain: PlanDomain,
    units: Vec<NewScheduledUnit>,
) -> Result<Plan> {
    let request = NewPlan {
        user_id: user.id,
        domain,
        name: format!("{domain} plan"),
        activate: true,
        units,
    };
    Ok(plans::create_plan(database, request, Utc::now()).await?)
}
