// ABOUTME: Integration tests for streak and calendar computation over the record store
// ABOUTME: Covers routine and diet streaks, calendar statuses, and users without plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use fitcontrol_intelligence::AdherenceSummary;
use fitcontrol_server::database_plugins::DatabaseProvider;
use fitcontrol_server::errors::ErrorCode;
use fitcontrol_server::models::{CalendarStatus, PlanDomain, WeekdayLabel};
use fitcontrol_server::services::{compliance, AdherenceService};
use uuid::Uuid;

use common::{
    create_adherence_service, create_test_database, create_test_plan, create_test_user, date,
    meal, noon, routine_day,
};

/// Reconcile `day` and set every routine unit record to `completed`
async fn log_routine_day(
    service: &AdherenceService,
    database: &dyn DatabaseProvider,
    user_id: Uuid,
    day: NaiveDate,
    completed: bool,
) -> Result<()> {
    let tracker = service
        .get_tracker_on(user_id, PlanDomain::Routine, day, noon(day))
        .await?;
    assert!(!tracker.items.is_empty(), "{day} should have routine work");
    for item in tracker.items {
        compliance::set_completed(database, item.record_id, completed, noon(day)).await?;
    }
    Ok(())
}

fn status_on(summary: &AdherenceSummary, day: NaiveDate) -> CalendarStatus {
    summary
        .calendar
        .iter()
        .find(|entry| entry.date == day)
        .map(|entry| entry.status)
        .unwrap()
}

#[tokio::test]
async fn test_monday_wednesday_routine_streak() -> Result<()> {
    let database = create_test_database().await?;
    let service = create_adherence_service(database.clone())?;
    let user = create_test_user(database.as_ref(), "ana").await?;
    create_test_plan(
        database.as_ref(),
        &user,
        PlanDomain::Routine,
        vec![
            routine_day(WeekdayLabel::Monday),
            routine_day(WeekdayLabel::Wednesday),
        ],
    )
    .await?;

    // 2024-02-28 Wed, 2024-03-04 Mon, 2024-03-06 Wed
    for day in [date(2024, 2, 28), date(2024, 3, 4), date(2024, 3, 6)] {
        log_routine_day(&service, database.as_ref(), user.id, day, true).await?;
    }

    let today = date(2024, 3, 6);
    let summary = service
        .get_streak_and_calendar_on(user.id, PlanDomain::Routine, today)
        .await?;

    assert_eq!(summary.streak, 3);
    assert_eq!(summary.today, today);
    assert_eq!(summary.calendar.len(), 35);
    assert_eq!(summary.calendar.last().map(|d| d.date), Some(today));
    assert_eq!(status_on(&summary, today), CalendarStatus::Completed);
    assert_eq!(status_on(&summary, date(2024, 3, 5)), CalendarStatus::Rest);
    assert_eq!(status_on(&summary, date(2024, 3, 4)), CalendarStatus::Completed);
    // Monday with no record at all
    assert_eq!(status_on(&summary, date(2024, 2, 26)), CalendarStatus::Pending);
    Ok(())
}

#[tokio::test]
async fn test_open_today_keeps_yesterdays_chain() -> Result<()> {
    let database = create_test_database().await?;
    let service = create_adherence_service(database.clone())?;
    let user = create_test_user(database.as_ref(), "bruno").await?;
    create_test_plan(
        database.as_ref(),
        &user,
        PlanDomain::Routine,
        vec![
            routine_day(WeekdayLabel::Monday),
            routine_day(WeekdayLabel::Wednesday),
        ],
    )
    .await?;

    log_routine_day(&service, database.as_ref(), user.id, date(2024, 3, 4), true).await?;
    // Today's record exists but is still open
    log_routine_day(&service, database.as_ref(), user.id, date(2024, 3, 6), false).await?;

    let summary = service
        .get_streak_and_calendar_on(user.id, PlanDomain::Routine, date(2024, 3, 6))
        .await?;

    assert_eq!(summary.streak, 1);
    assert_eq!(status_on(&summary, date(2024, 3, 6)), CalendarStatus::Pending);
    Ok(())
}

#[tokio::test]
async fn test_false_today_and_false_prior_monday() -> Result<()> {
    let database = create_test_database().await?;
    let service = create_adherence_service(database.clone())?;
    let user = create_test_user(database.as_ref(), "carla").await?;
    create_test_plan(
        database.as_ref(),
        &user,
        PlanDomain::Routine,
        vec![
            routine_day(WeekdayLabel::Monday),
            routine_day(WeekdayLabel::Wednesday),
        ],
    )
    .await?;

    let today = date(2024, 3, 4);
    log_routine_day(&service, database.as_ref(), user.id, date(2024, 2, 26), false).await?;
    log_routine_day(&service, database.as_ref(), user.id, today, false).await?;

    let summary = service
        .get_streak_and_calendar_on(user.id, PlanDomain::Routine, today)
        .await?;

    assert_eq!(summary.streak, 0);
    assert_eq!(status_on(&summary, today), CalendarStatus::Pending);
    assert_eq!(status_on(&summary, date(2024, 2, 26)), CalendarStatus::Missed);
    assert_eq!(status_on(&summary, date(2024, 2, 28)), CalendarStatus::Pending);
    assert_eq!(status_on(&summary, date(2024, 3, 3)), CalendarStatus::Rest);
    Ok(())
}

#[tokio::test]
async fn test_user_without_plan_has_rest_calendar() -> Result<()> {
    let database = create_test_database().await?;
    let service = create_adherence_service(database.clone())?;
    let user = create_test_user(database.as_ref(), "dario").await?;

    let summary = service
        .get_streak_and_calendar_on(user.id, PlanDomain::Diet, date(2024, 3, 6))
        .await?;

    assert_eq!(summary.streak, 0);
    assert_eq!(summary.calendar.len(), 35);
    assert!(summary
        .calendar
        .iter()
        .all(|day| day.status == CalendarStatus::Rest));
    Ok(())
}

#[tokio::test]
async fn test_diet_streak_follows_day_record() -> Result<()> {
    let database = create_test_database().await?;
    let service = create_adherence_service(database.clone())?;
    let user = create_test_user(database.as_ref(), "elena").await?;
    let weekdays = WeekdayLabel::ALL;
    let units = weekdays
        .iter()
        .flat_map(|day| {
            [
                meal(*day, "Desayuno", "07:30"),
                meal(*day, "Cena", "21:00"),
            ]
        })
        .collect();
    create_test_plan(database.as_ref(), &user, PlanDomain::Diet, units).await?;

    for day in [date(2024, 3, 4), date(2024, 3, 5)] {
        let tracker = service
            .get_tracker_on(user.id, PlanDomain::Diet, day, noon(day))
            .await?;
        assert_eq!(tracker.items.len(), 2);
        let day_record = tracker.day_record_id.unwrap();
        compliance::set_completed(database.as_ref(), day_record, true, noon(day)).await?;
    }

    // Meals completed without the day record do not count
    let today = date(2024, 3, 6);
    let tracker = service
        .get_tracker_on(user.id, PlanDomain::Diet, today, noon(today))
        .await?;
    for item in &tracker.items {
        compliance::set_completed(database.as_ref(), item.record_id, true, noon(today)).await?;
    }

    let summary = service
        .get_streak_and_calendar_on(user.id, PlanDomain::Diet, today)
        .await?;
    assert_eq!(summary.streak, 2);
    assert_eq!(status_on(&summary, today), CalendarStatus::Pending);
    assert_eq!(status_on(&summary, date(2024, 3, 3)), CalendarStatus::Pending);
    Ok(())
}

#[tokio::test]
async fn test_units_without_activities_are_rest_days() -> Result<()> {
    let database = create_test_database().await?;
    let service = create_adherence_service(database.clone())?;
    let user = create_test_user(database.as_ref(), "fabio").await?;
    let mut empty_friday = routine_day(WeekdayLabel::Friday);
    empty_friday.activities.clear();
    create_test_plan(
        database.as_ref(),
        &user,
        PlanDomain::Routine,
        vec![routine_day(WeekdayLabel::Monday), empty_friday],
    )
    .await?;

    let summary = service
        .get_streak_and_calendar_on(user.id, PlanDomain::Routine, date(2024, 3, 8))
        .await?;
    assert_eq!(status_on(&summary, date(2024, 3, 8)), CalendarStatus::Rest);
    assert_eq!(status_on(&summary, date(2024, 3, 4)), CalendarStatus::Pending);
    Ok(())
}

#[tokio::test]
async fn test_unknown_user_is_not_found() -> Result<()> {
    let database = create_test_database().await?;
    let service = create_adherence_service(Arc::clone(&database) as Arc<dyn DatabaseProvider>)?;

    let err = service
        .get_streak_and_calendar_on(Uuid::new_v4(), PlanDomain::Routine, date(2024, 3, 6))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    Ok(())
}
