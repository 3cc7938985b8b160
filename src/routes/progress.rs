// ABOUTME: Weight progress route handlers
// ABOUTME: Open, list, and partially update weight-goal entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::Utc;
use fitcontrol_core::models::{NewWeightProgress, WeightProgressUpdate};
use uuid::Uuid;

use crate::errors::AppError;
use crate::routes::extract::{ApiJson, ApiPath};
use crate::server::ServerResources;
use crate::services::progress;

/// Weight progress routes handler
pub struct ProgressRoutes;

impl ProgressRoutes {
    /// Create all weight progress routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/:user_id/progress",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/progress/:progress_id",
                put(Self::handle_update).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle POST /api/users/:user_id/progress
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(user_id): ApiPath<Uuid>,
        ApiJson(body): ApiJson<NewWeightProgress>,
    ) -> Result<Response, AppError> {
        let now = Utc::now();
        let entry = progress::create_progress(
            resources.database.as_ref(),
            user_id,
            body,
            resources.adherence.today(now),
            now,
        )
        .await?;
        Ok((StatusCode::CREATED, Json(entry)).into_response())
    }

    /// Handle GET /api/users/:user_id/progress
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(user_id): ApiPath<Uuid>,
    ) -> Result<Response, AppError> {
        let entries = progress::list_progress(resources.database.as_ref(), user_id).await?;
        Ok((StatusCode::OK, Json(entries)).into_response())
    }

    /// Handle PUT /api/progress/:progress_id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(progress_id): ApiPath<Uuid>,
        ApiJson(body): ApiJson<WeightProgressUpdate>,
    ) -> Result<Response, AppError> {
        let entry =
            progress::update_progress(resources.database.as_ref(), progress_id, body).await?;
        Ok((StatusCode::OK, Json(entry)).into_response())
    }

    /// Handle DELETE /api/progress/:progress_id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(progress_id): ApiPath<Uuid>,
    ) -> Result<Response, AppError> {
        progress::delete_progress(resources.database.as_ref(), progress_id).await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
