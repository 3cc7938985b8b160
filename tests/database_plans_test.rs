// ABOUTME: Record store tests for plans, compliance records, progress, and energy profiles
// ABOUTME: Runs against an on-disk SQLite file to cover schema, transactions, and unique keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::Utc;
use fitcontrol_server::config::DatabaseUrl;
use fitcontrol_server::database_plugins::{DatabaseProvider, SqliteDatabase};
use fitcontrol_server::errors::ErrorCode;
use fitcontrol_server::models::{
    ComplianceAnchor, ComplianceKey, ComplianceRecord, NewUser, NewWeightProgress, PlanDomain,
    UserUpdate, WeekdayLabel, WeightProgressUpdate,
};
use fitcontrol_server::services::{plans, progress, users, PlanReplacement};
use tempfile::TempDir;

use common::{create_test_plan, create_test_user, date, init_test_logging, meal, routine_day};

async fn file_database(dir: &TempDir) -> Result<SqliteDatabase> {
    init_test_logging();
    let url = DatabaseUrl::SQLite {
        path: dir.path().join("nested").join("fitcontrol.db"),
    };
    let database = SqliteDatabase::new(&url, 2).await?;
    database.migrate().await?;
    Ok(database)
}

#[tokio::test]
async fn test_plan_round_trip_on_disk() -> Result<()> {
    let dir = TempDir::new()?;
    let database = file_database(&dir).await?;
    let user = create_test_user(&database, "ana").await?;

    let plan = create_test_plan(
        &database,
        &user,
        PlanDomain::Diet,
        vec![
            meal(WeekdayLabel::Saturday, "Desayuno", "09:00"),
            meal(WeekdayLabel::Wednesday, "Desayuno", "07:30"),
            meal(WeekdayLabel::Wednesday, "Cena", "21:00"),
        ],
    )
    .await?;

    let loaded = database.get_plan(plan.id).await?.unwrap();
    assert_eq!(loaded.name, plan.name);
    assert!(loaded.is_active);
    let order: Vec<(WeekdayLabel, u32)> = loaded
        .units
        .iter()
        .map(|unit| (unit.weekday, unit.position))
        .collect();
    assert_eq!(
        order,
        vec![
            (WeekdayLabel::Wednesday, 0),
            (WeekdayLabel::Wednesday, 1),
            (WeekdayLabel::Saturday, 0),
        ]
    );
    assert_eq!(loaded.units[1].scheduled_time.as_deref(), Some("21:00"));
    assert_eq!(loaded.units[0].activities.len(), 1);
    assert_eq!(
        loaded.units[0].activities[0].details,
        plan.units[0].activities[0].details
    );

    // Reopening the file sees the same data
    drop(database);
    let reopened = file_database(&dir).await?;
    assert!(reopened.get_plan(plan.id).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_creating_plan_deactivates_previous_one() -> Result<()> {
    let dir = TempDir::new()?;
    let database = file_database(&dir).await?;
    let user = create_test_user(&database, "bruno").await?;

    let first = create_test_plan(
        &database,
        &user,
        PlanDomain::Routine,
        vec![routine_day(WeekdayLabel::Monday)],
    )
    .await?;
    let diet = create_test_plan(
        &database,
        &user,
        PlanDomain::Diet,
        vec![meal(WeekdayLabel::Monday, "Cena", "21:00")],
    )
    .await?;
    let second = create_test_plan(
        &database,
        &user,
        PlanDomain::Routine,
        vec![routine_day(WeekdayLabel::Friday)],
    )
    .await?;

    let active = database
        .get_active_plan(user.id, PlanDomain::Routine)
        .await?
        .unwrap();
    assert_eq!(active.id, second.id);
    assert!(!database.get_plan(first.id).await?.unwrap().is_active);
    // Other domains are untouched
    assert!(database.get_plan(diet.id).await?.unwrap().is_active);

    plans::activate_plan(&database, first.id).await?;
    let active = database
        .get_active_plan(user.id, PlanDomain::Routine)
        .await?
        .unwrap();
    assert_eq!(active.id, first.id);

    let routines = database
        .list_plans(user.id, Some(PlanDomain::Routine))
        .await?;
    assert_eq!(routines.len(), 2);
    assert_eq!(database.list_plans(user.id, None).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_replace_keeps_unit_ids_by_weekday_and_position() -> Result<()> {
    let dir = TempDir::new()?;
    let database = file_database(&dir).await?;
    let user = create_test_user(&database, "carla").await?;
    let plan = create_test_plan(
        &database,
        &user,
        PlanDomain::Routine,
        vec![
            routine_day(WeekdayLabel::Monday),
            routine_day(WeekdayLabel::Thursday),
        ],
    )
    .await?;
    let monday_unit = plan.units[0].id;
    let thursday_unit = plan.units[1].id;

    let replaced = plans::replace_plan(
        &database,
        plan.id,
        PlanReplacement {
            name: "Upper / Lower".to_owned(),
            units: vec![
                routine_day(WeekdayLabel::Monday),
                routine_day(WeekdayLabel::Saturday),
            ],
        },
    )
    .await?;

    let loaded = database.get_plan(plan.id).await?.unwrap();
    assert_eq!(loaded.name, "Upper / Lower");
    assert_eq!(loaded.units.len(), 2);
    assert_eq!(loaded.units[0].id, monday_unit);
    assert_eq!(replaced.units[0].id, monday_unit);
    assert!(loaded.units.iter().all(|unit| unit.id != thursday_unit));
    assert_eq!(loaded.units[1].weekday, WeekdayLabel::Saturday);
    assert_eq!(loaded.units[0].activities.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_delete_plan_removes_its_records() -> Result<()> {
    let dir = TempDir::new()?;
    let database = file_database(&dir).await?;
    let user = create_test_user(&database, "dario").await?;
    let plan = create_test_plan(
        &database,
        &user,
        PlanDomain::Diet,
        vec![meal(WeekdayLabel::Monday, "Desayuno", "07:30")],
    )
    .await?;

    let monday = date(2024, 3, 4);
    let now = Utc::now();
    for anchor in [
        ComplianceAnchor::unit(plan.units[0].id),
        ComplianceAnchor::plan(plan.id),
    ] {
        let key = ComplianceKey::new(user.id, anchor, monday);
        database
            .insert_compliance(&ComplianceRecord::pending(key, PlanDomain::Diet, now))
            .await?;
    }
    assert_eq!(database.list_compliance_for_date(user.id, monday).await?.len(), 2);

    plans::delete_plan(&database, plan.id).await?;
    assert!(database.get_plan(plan.id).await?.is_none());
    assert!(database.list_compliance_for_date(user.id, monday).await?.is_empty());

    let err = plans::delete_plan(&database, plan.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_compliance_key_is_already_exists() -> Result<()> {
    let dir = TempDir::new()?;
    let database = file_database(&dir).await?;
    let user = create_test_user(&database, "elena").await?;
    let plan = create_test_plan(
        &database,
        &user,
        PlanDomain::Routine,
        vec![routine_day(WeekdayLabel::Monday)],
    )
    .await?;

    let key = ComplianceKey::new(
        user.id,
        ComplianceAnchor::unit(plan.units[0].id),
        date(2024, 3, 4),
    );
    let first = ComplianceRecord::pending(key, PlanDomain::Routine, Utc::now());
    database.insert_compliance(&first).await?;

    let second = ComplianceRecord::pending(key, PlanDomain::Routine, Utc::now());
    let err = database.insert_compliance(&second).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    let found = database.find_compliance(&key).await?.unwrap();
    assert_eq!(found.id, first.id);

    let updated = database
        .set_compliance_completed(first.id, true, Utc::now())
        .await?
        .unwrap();
    assert!(updated.completed);
    assert!(updated.updated_at >= updated.created_at);

    let window = database
        .list_compliance_for_anchors(
            user.id,
            &[key.anchor],
            date(2024, 3, 1),
            date(2024, 3, 4),
        )
        .await?;
    assert_eq!(window.len(), 1);
    let outside = database
        .list_compliance_for_anchors(
            user.id,
            &[key.anchor],
            date(2024, 3, 5),
            date(2024, 3, 31),
        )
        .await?;
    assert!(outside.is_empty());
    assert!(database
        .list_compliance_for_anchors(user.id, &[], date(2024, 1, 1), date(2024, 12, 31))
        .await?
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn test_new_progress_closes_previous_entry() -> Result<()> {
    let dir = TempDir::new()?;
    let database = file_database(&dir).await?;
    let user = create_test_user(&database, "fabio").await?;

    let first = progress::create_progress(
        &database,
        user.id,
        NewWeightProgress {
            current_weight: 82.0,
            target_weight: 76.0,
            goal: "Perder grasa".to_owned(),
            started_on: Some(date(2024, 1, 1)),
        },
        date(2024, 1, 1),
        Utc::now(),
    )
    .await?;
    let second = progress::create_progress(
        &database,
        user.id,
        NewWeightProgress {
            current_weight: 78.5,
            target_weight: 80.0,
            goal: "Ganar masa".to_owned(),
            started_on: None,
        },
        date(2024, 3, 1),
        Utc::now(),
    )
    .await?;
    assert_eq!(second.started_on, date(2024, 3, 1));

    let active = database.get_active_progress(user.id).await?.unwrap();
    assert_eq!(active.id, second.id);
    let closed = database.get_progress(first.id).await?.unwrap();
    assert!(!closed.is_active);
    assert!(closed.ended_on.is_some());

    let updated = progress::update_progress(
        &database,
        second.id,
        WeightProgressUpdate {
            current_weight: Some(79.0),
            ..WeightProgressUpdate::default()
        },
    )
    .await?;
    assert!((updated.current_weight - 79.0).abs() < f64::EPSILON);
    assert!((updated.target_weight - 80.0).abs() < f64::EPSILON);

    let err = progress::update_progress(
        &database,
        second.id,
        WeightProgressUpdate {
            ended_on: Some(date(2024, 2, 1)),
            ..WeightProgressUpdate::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);

    let history = progress::list_progress(&database, user.id).await?;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second.id);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let database = file_database(&dir).await?;
    let user = create_test_user(&database, "gina").await?;

    let err = users::create_user(
        &database,
        NewUser {
            username: "Gina Two".to_owned(),
            email: user.email.to_uppercase(),
            weight_unit: Some("lb".to_owned()),
        },
        Utc::now(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    Ok(())
}

#[tokio::test]
async fn test_user_update_keeps_unset_fields() -> Result<()> {
    let dir = TempDir::new()?;
    let database = file_database(&dir).await?;
    let user = create_test_user(&database, "hugo").await?;
    let other = create_test_user(&database, "iris").await?;

    let updated = users::update_user(
        &database,
        user.id,
        UserUpdate {
            username: Some("Hugo B".to_owned()),
            ..UserUpdate::default()
        },
    )
    .await?;
    assert_eq!(updated.username, "Hugo B");
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.weight_unit, user.weight_unit);

    let err = users::update_user(
        &database,
        user.id,
        UserUpdate {
            email: Some(other.email.to_uppercase()),
            ..UserUpdate::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    let err = users::update_user(&database, user.id, UserUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    Ok(())
}

#[tokio::test]
async fn test_delete_progress_entry() -> Result<()> {
    let dir = TempDir::new()?;
    let database = file_database(&dir).await?;
    let user = create_test_user(&database, "julia").await?;

    let entry = progress::create_progress(
        &database,
        user.id,
        NewWeightProgress {
            current_weight: 64.0,
            target_weight: 60.0,
            goal: "Definir".to_owned(),
            started_on: None,
        },
        date(2024, 5, 1),
        Utc::now(),
    )
    .await?;

    progress::delete_progress(&database, entry.id).await?;
    assert!(database.get_progress(entry.id).await?.is_none());
    assert!(database.get_active_progress(user.id).await?.is_none());

    let err = progress::delete_progress(&database, entry.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    Ok(())
}
