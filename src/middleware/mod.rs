// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID generation, request spans, and CORS configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

/// CORS configuration
pub mod cors;
/// Request ID generation and request spans
pub mod request_id;

pub use cors::setup_cors;
pub use request_id::{create_request_span, request_id_middleware, RequestId, REQUEST_ID_HEADER};
