// ABOUTME: HTTP server assembly: shared resources, router composition, and the serve loop
// ABOUTME: Wires the record store and adherence engine into axum routes with tracing and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! # HTTP Server
//!
//! [`ServerResources`] is built once at startup and shared by every handler
//! through `Arc`. [`build_router`] merges the per-domain routers and applies
//! the middleware stack; [`run`] binds the listener and serves until
//! interrupted.

use std::future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{middleware, Router};
use fitcontrol_intelligence::AdherenceEngine;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::database_plugins::DatabaseProvider;
use crate::errors::AppResult;
use crate::middleware::{request_id_middleware, setup_cors};
use crate::routes::{
    AdherenceRoutes, ComplianceRoutes, DashboardRoutes, EnergyRoutes, HealthRoutes, PlanRoutes,
    ProgressRoutes, UserRoutes,
};
use crate::services::AdherenceService;

/// Everything a request handler needs
pub struct ServerResources {
    /// Record store
    pub database: Arc<dyn DatabaseProvider>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Streak, calendar, and tracker service
    pub adherence: AdherenceService,
}

impl ServerResources {
    /// Build resources from a store and configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when the adherence settings are out of range.
    pub fn new(database: Arc<dyn DatabaseProvider>, config: Arc<ServerConfig>) -> AppResult<Self> {
        let engine = AdherenceEngine::new(config.adherence_config()?);
        let adherence = AdherenceService::new(
            Arc::clone(&database),
            engine,
            config.adherence.reconciliation_concurrency,
        );
        Ok(Self {
            database,
            config,
            adherence,
        })
    }
}

/// Compose all routes with the middleware stack
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.cors);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(UserRoutes::routes(Arc::clone(&resources)))
        .merge(DashboardRoutes::routes(Arc::clone(&resources)))
        .merge(AdherenceRoutes::routes(Arc::clone(&resources)))
        .merge(ComplianceRoutes::routes(Arc::clone(&resources)))
        .merge(PlanRoutes::routes(Arc::clone(&resources)))
        .merge(ProgressRoutes::routes(Arc::clone(&resources)))
        .merge(EnergyRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}

/// Serve the API on `0.0.0.0:<http_port>` until Ctrl-C
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], resources.config.http_port));
    let router = build_router(resources);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
