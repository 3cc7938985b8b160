// ABOUTME: Dashboard and profile route handlers
// ABOUTME: Streaks for both domains plus the active weight goal or profile identity
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
use uuid::Uuid;

use crate::errors::AppError;
use crate::routes::extract::ApiPath;
use crate::server::ServerResources;
use crate::services::dashboard;

/// Dashboard routes handler
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create all dashboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users/:user_id/dashboard", get(Self::handle_dashboard))
            .route("/api/users/:user_id/profile", get(Self::handle_profile))
            .with_state(resources)
    }

    /// Handle GET /api/users/:user_id/dashboard
    async fn handle_dashboard(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(user_id): ApiPath<Uuid>,
    ) -> Result<Response, AppError> {
        let today = resources.adherence.today(Utc::now());
        let summary = dashboard::get_dashboard(
            resources.database.as_ref(),
            &resources.adherence,
            user_id,
            today,
        )
        .await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }

    /// Handle GET /api/users/:user_id/profile
    async fn handle_profile(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(user_id): ApiPath<Uuid>,
    ) -> Result<Response, AppError> {
        let today = resources.adherence.today(Utc::now());
        let profile = dashboard::get_profile(
            resources.database.as_ref(),
            &resources.adherence,
            user_id,
            today,
        )
        .await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
