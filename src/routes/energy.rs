// ABOUTME: Energy expenditure route handlers
// ABOUTME: Recompute-and-store and lookup of a user's energy profile
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
use fitcontrol_core::models::EnergyInputs;
use uuid::Uuid;

use crate::errors::AppError;
use crate::routes::extract::{ApiJson, ApiPath};
use crate::server::ServerResources;
use crate::services::energy;

/// Energy routes handler
pub struct EnergyRoutes;

impl EnergyRoutes {
    /// Create all energy routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/:user_id/energy",
                get(Self::handle_get).put(Self::handle_upsert),
            )
            .with_state(resources)
    }

    /// Handle PUT /api/users/:user_id/energy
    async fn handle_upsert(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(user_id): ApiPath<Uuid>,
        ApiJson(body): ApiJson<EnergyInputs>,
    ) -> Result<Response, AppError> {
        let profile =
            energy::upsert_profile(resources.database.as_ref(), user_id, body, Utc::now()).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle GET /api/users/:user_id/energy
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(user_id): ApiPath<Uuid>,
    ) -> Result<Response, AppError> {
        let profile = energy::get_profile(resources.database.as_ref(), user_id).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
