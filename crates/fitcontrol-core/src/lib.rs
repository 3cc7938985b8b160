// ABOUTME: Core types and constants for the FitControl adherence backend
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

#![deny(unsafe_code)]

//! # `FitControl` Core
//!
//! Foundation crate providing shared types and constants for the `FitControl`
//! fitness tracking backend. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Plans, scheduled units, compliance records, calendar days, users

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and configuration defaults organized by domain
pub mod constants;

/// Core data models (plans, weekdays, compliance records, progress, energy)
pub mod models;
