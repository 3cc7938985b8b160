// ABOUTME: Request extractors that report rejections as AppError responses
// ABOUTME: Wraps axum's Json, Path, and Query so malformed input gets the JSON error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! Thin wrappers over axum extractors.
//!
//! A bad body, path segment, or query string becomes `INVALID_FORMAT` (400)
//! with the standard error body instead of axum's plain-text rejection.

use axum::extract::{FromRequest, FromRequestParts, Path, Query};
use axum::Json;

use crate::errors::AppError;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Query string parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
