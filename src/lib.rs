// ABOUTME: Main library entry point for the FitControl fitness tracking backend
// ABOUTME: Exposes configuration, logging, record store, services, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

#![deny(unsafe_code)]

//! # `FitControl` Server
//!
//! REST backend for routine and diet plans, weight progress, energy
//! expenditure, and adherence tracking. The adherence engine itself lives in
//! `fitcontrol-intelligence`; this crate loads its inputs from the record
//! store and serves its outputs over HTTP.
//!
//! ## Architecture
//!
//! - **config**: environment-driven server configuration
//! - **logging**: `tracing` subscriber setup and structured log events
//! - **database**: `SQLite` schema and per-table managers
//! - **`database_plugins`**: the `DatabaseProvider` trait services depend on
//! - **services**: business logic, including lazy compliance reconciliation
//! - **routes** / **middleware** / **server**: the axum HTTP surface

/// Configuration management
pub mod config;

/// Error types (re-exported from `fitcontrol-core`)
pub mod errors;

/// Logging configuration and structured log events
pub mod logging;

/// `SQLite` schema and table managers
pub mod database;

/// Record store abstraction
pub mod database_plugins;

/// Domain services
pub mod services;

/// HTTP middleware
pub mod middleware;

/// HTTP route handlers
pub mod routes;

/// Server assembly
pub mod server;

pub use fitcontrol_core::{constants, models};
