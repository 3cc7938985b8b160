// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Loads server, database, adherence, and CORS settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! Configuration module for the `FitControl` server.
//!
//! All settings come from environment variables (optionally seeded from a
//! `.env` file); see [`environment::ServerConfig::from_env`].

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AdherenceSettings, CorsConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel,
    ServerConfig,
};
