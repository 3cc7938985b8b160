// ABOUTME: Adherence route handlers: streak with calendar, and today's tracker
// ABOUTME: The domain path segment accepts routine/diet (also rutina/dieta)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! Adherence routes
//!
//! `GET /api/users/:user_id/adherence/:domain` is read-only.
//! `GET /api/users/:user_id/tracker/:domain/today` creates today's missing
//! compliance records before answering, so the first call of the day writes.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use fitcontrol_core::models::PlanDomain;
use uuid::Uuid;

use crate::errors::AppError;
use crate::routes::extract::ApiPath;
use crate::server::ServerResources;

/// Adherence routes handler
pub struct AdherenceRoutes;

impl AdherenceRoutes {
    /// Create all adherence routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/:user_id/adherence/:domain",
                get(Self::handle_streak_and_calendar),
            )
            .route(
                "/api/users/:user_id/tracker/:domain/today",
                get(Self::handle_today_tracker),
            )
            .with_state(resources)
    }

    /// Handle GET /api/users/:user_id/adherence/:domain
    async fn handle_streak_and_calendar(
        State(resources): State<Arc<ServerResources>>,
        ApiPath((user_id, domain)): ApiPath<(Uuid, String)>,
    ) -> Result<Response, AppError> {
        let domain: PlanDomain = domain.parse()?;
        let summary = resources
            .adherence
            .get_streak_and_calendar(user_id, domain)
            .await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }

    /// Handle GET /api/users/:user_id/tracker/:domain/today
    async fn handle_today_tracker(
        State(resources): State<Arc<ServerResources>>,
        ApiPath((user_id, domain)): ApiPath<(Uuid, String)>,
    ) -> Result<Response, AppError> {
        let domain: PlanDomain = domain.parse()?;
        let tracker = resources
            .adherence
            .get_today_tracker(user_id, domain)
            .await?;
        Ok((StatusCode::OK, Json(tracker)).into_response())
    }
}
