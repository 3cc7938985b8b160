// ABOUTME: Plan route handlers for routines and diets
// ABOUTME: Create, list, get, replace, activate, and delete plans; meal nutrition totals
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
use fitcontrol_core::models::{NewPlan, PlanDomain};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::routes::extract::{ApiJson, ApiPath, ApiQuery};
use crate::server::ServerResources;
use crate::services::plans::{self, PlanReplacement};

/// Query parameters for listing plans
#[derive(Debug, Deserialize)]
struct ListPlansQuery {
    domain: Option<String>,
}

/// Plan routes handler
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create all plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/plans", post(Self::handle_create))
            .route("/api/users/:user_id/plans", get(Self::handle_list))
            .route(
                "/api/plans/:plan_id",
                get(Self::handle_get)
                    .put(Self::handle_replace)
                    .delete(Self::handle_delete),
            )
            .route("/api/plans/:plan_id/activate", post(Self::handle_activate))
            .route(
                "/api/plans/:plan_id/units/:unit_id/nutrition",
                get(Self::handle_meal_nutrition),
            )
            .with_state(resources)
    }

    /// Handle POST /api/plans
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        ApiJson(body): ApiJson<NewPlan>,
    ) -> Result<Response, AppError> {
        let plan = plans::create_plan(resources.database.as_ref(), body, Utc::now()).await?;
        Ok((StatusCode::CREATED, Json(plan)).into_response())
    }

    /// Handle GET /api/users/:user_id/plans?domain=
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(user_id): ApiPath<Uuid>,
        ApiQuery(query): ApiQuery<ListPlansQuery>,
    ) -> Result<Response, AppError> {
        let domain = query
            .domain
            .as_deref()
            .map(str::parse::<PlanDomain>)
            .transpose()?;
        let plans = plans::list_plans(resources.database.as_ref(), user_id, domain).await?;
        Ok((StatusCode::OK, Json(plans)).into_response())
    }

    /// Handle GET /api/plans/:plan_id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(plan_id): ApiPath<Uuid>,
    ) -> Result<Response, AppError> {
        let plan = plans::require_plan(resources.database.as_ref(), plan_id).await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    /// Handle PUT /api/plans/:plan_id
    async fn handle_replace(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(plan_id): ApiPath<Uuid>,
        ApiJson(body): ApiJson<PlanReplacement>,
    ) -> Result<Response, AppError> {
        let plan = plans::replace_plan(resources.database.as_ref(), plan_id, body).await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    /// Handle POST /api/plans/:plan_id/activate
    async fn handle_activate(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(plan_id): ApiPath<Uuid>,
    ) -> Result<Response, AppError> {
        let plan = plans::activate_plan(resources.database.as_ref(), plan_id).await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    /// Handle DELETE /api/plans/:plan_id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        ApiPath(plan_id): ApiPath<Uuid>,
    ) -> Result<Response, AppError> {
        plans::delete_plan(resources.database.as_ref(), plan_id).await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle GET /api/plans/:plan_id/units/:unit_id/nutrition
    async fn handle_meal_nutrition(
        State(resources): State<Arc<ServerResources>>,
        ApiPath((plan_id, unit_id)): ApiPath<(Uuid, Uuid)>,
    ) -> Result<Response, AppError> {
        let summary = plans::meal_nutrition(resources.database.as_ref(), plan_id, unit_id).await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }
}
