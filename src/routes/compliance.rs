// ABOUTME: Compliance record route handlers
// ABOUTME: Per-date listing, single-record lookup, and setting the completed flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::routes::extract::{ApiJson, ApiPath, ApiQuery};
use crate::server::ServerResources;
use crate::services::compliance;

/// Query parameters for listing records
#[derive(Debug, Deserialize)]
struct DateQuery {
    date: Option<String>,
}

/// Request body for setting completion
#[derive(Debug, Deserialize)]
pub struct SetCompletedBody {
    /// New completed flag
    pub completed: bool,
}

/// Compliance routes handler
pub struct ComplianceRoutes;

impl ComplianceRoutes {
    /// Create all compliance routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/:user_id/compliance",
                get(Self::handle_list_for_date),
            )
            .route(
                "/api/compliance/:record_id",
                get(Self::handle_get).put(Self::handle_set_completed),
            )
            .with_state(resources)
    }

    /// Handle GET /api/users/:user_id/compliance?date=YYYY-MM-DD
    async fn handle_list_for_date(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(user_id): ApiPath<Uuid>,
        ApiQuery(query): ApiQuery<DateQuery>,
    ) -> Result<Response, AppError> {
        let date = query.date.ok_or_else(|| AppError::missing_field("date"))?;
        let records =
            compliance::list_for_date(resources.database.as_ref(), user_id, &date).await?;
        Ok((StatusCode::OK, Json(records)).into_response())
    }

    /// Handle GET /api/compliance/:record_id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(record_id): ApiPath<Uuid>,
    ) -> Result<Response, AppError> {
        let record = compliance::get_record(resources.database.as_ref(), record_id).await?;
        Ok((StatusCode::OK, Json(record)).into_response())
    }

    /// Handle PUT /api/compliance/:record_id
    async fn handle_set_completed(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(record_id): ApiPath<Uuid>,
        ApiJson(body): ApiJson<SetCompletedBody>,
    ) -> Result<Response, AppError> {
        let record = compliance::set_completed(
            resources.database.as_ref(),
            record_id,
            body.completed,
            Utc::now(),
        )
        .await?;
        Ok((StatusCode::OK, Json(record)).into_response())
    }
}
