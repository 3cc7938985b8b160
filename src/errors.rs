// ABOUTME: Error types for the FitControl server, re-exported from the core crate
// ABOUTME: Keeps `crate::errors::AppError` as the single error path inside the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! # Unified Error Handling System
//!
//! Server code imports errors from here; the definitions live in
//! `fitcontrol-core` so the engine crate shares them.

pub use fitcontrol_core::errors::{
    AppError, AppResult, DatabaseError, ErrorCode, ErrorContext, ErrorResponse,
    ErrorResponseDetails,
};
