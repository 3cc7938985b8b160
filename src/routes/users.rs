// ABOUTME: User profile route handlers
// ABOUTME: Registration, partial update, and lookup of user profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use fitcontrol_core::models::{NewUser, UserUpdate};
use uuid::Uuid;

use crate::errors::AppError;
use crate::routes::extract::{ApiJson, ApiPath};
use crate::server::ServerResources;
use crate::services::users;

/// User routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users", post(Self::handle_create))
            .route(
                "/api/users/:user_id",
                get(Self::handle_get).put(Self::handle_update),
            )
            .with_state(resources)
    }

    /// Handle POST /api/users
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        ApiJson(body): ApiJson<NewUser>,
    ) -> Result<Response, AppError> {
        let user = users::create_user(resources.database.as_ref(), body, Utc::now()).await?;
        Ok((StatusCode::CREATED, Json(user)).into_response())
    }

    /// Handle GET /api/users/:user_id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(user_id): ApiPath<Uuid>,
    ) -> Result<Response, AppError> {
        let user = users::require_user(resources.database.as_ref(), user_id).await?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Handle PUT /api/users/:user_id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(user_id): ApiPath<Uuid>,
        ApiJson(body): ApiJson<UserUpdate>,
    ) -> Result<Response, AppError> {
        let user = users::update_user(resources.database.as_ref(), user_id, body).await?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }
}
