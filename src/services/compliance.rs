// ABOUTME: Compliance record lookups and completion toggling
// ABOUTME: Parses wire dates and maps missing records to ResourceNotFound
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use chrono::{DateTime, Utc};
use fitcontrol_core::models::ComplianceRecord;
use fitcontrol_intelligence::dates::parse_date;
use tracing::info;
use uuid::Uuid;

use super::users::require_user;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};

/// Load a record or fail with `ResourceNotFound`
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown record.
pub async fn get_record(
    database: &dyn DatabaseProvider,
    record_id: Uuid,
) -> AppResult<ComplianceRecord> {
    database
        .get_compliance(record_id)
        .await?
        .ok_or_else(|| record_not_found(record_id))
}

/// Set the completed flag of a record
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown record.
pub async fn set_completed(
    database: &dyn DatabaseProvider,
    record_id: Uuid,
    completed: bool,
    now: DateTime<Utc>,
) -> AppResult<ComplianceRecord> {
    let record = database
        .set_compliance_completed(record_id, completed, now)
        .await?
        .ok_or_else(|| record_not_found(record_id))?;

    info!(
        record.id = %record.id,
        user.id = %record.user_id,
        plan.domain = %record.domain,
        completed,
        "Compliance updated"
    );
    Ok(record)
}

/// All records of a user due on `date` (`YYYY-MM-DD`)
///
/// # Errors
///
/// Returns `InvalidFormat` for a malformed date and `ResourceNotFound` for
/// an unknown user.
pub async fn list_for_date(
    database: &dyn DatabaseProvider,
    user_id: Uuid,
    date: &str,
) -> AppResult<Vec<ComplianceRecord>> {
    let date = parse_date(date)?;
    require_user(database, user_id).await?;
    database.list_compliance_for_date(user_id, date).await
}

fn record_not_found(record_id: Uuid) -> AppError {
    AppError::not_found(format!("Compliance record {record_id}"))
        .with_resource_id(record_id.to_string())
}
