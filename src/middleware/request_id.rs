// ABOUTME: Request ID middleware for correlation and structured logging
// ABOUTME: Accepts or generates x-request-id, runs the request in a span, and echoes the id back
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

use std::time::Instant;

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use http::{header, HeaderValue};
use tracing::{field, info_span, Instrument, Span};
use uuid::Uuid;

use crate::errors::ErrorResponse;
use crate::logging::AppLogger;

/// Header carrying the request ID in both directions
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_INCOMING_ID_LEN: usize = 128;

/// Request ID stored in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh `req_<uuid>` identifier
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("req_{}", Uuid::new_v4().simple()))
    }

    /// Borrow the identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_header(value: &HeaderValue) -> Option<Self> {
        value
            .to_str()
            .ok()
            .map(str::trim)
            .filter(|id| !id.is_empty() && id.len() <= MAX_INCOMING_ID_LEN)
            .filter(|id| id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .map(|id| Self(id.to_owned()))
    }
}

/// Create the `http_request` span for one request
pub fn create_request_span(method: &str, path: &str, request_id: &RequestId) -> Span {
    info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id.as_str(),
        status_code = field::Empty,
        duration_ms = field::Empty,
    )
}

/// Re-render an error body with the request ID filled in
///
/// Responses built from `AppError` carry their `ErrorResponse` in the
/// extensions; anything else passes through untouched.
fn stamp_error_body(mut response: Response, request_id: &RequestId) -> Response {
    let Some(mut body) = response.extensions_mut().remove::<ErrorResponse>() else {
        return response;
    };
    body.error.request_id = Some(request_id.as_str().to_owned());

    let Ok(bytes) = serde_json::to_vec(&body) else {
        return response;
    };
    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}

/// Tag each request with an ID, log its completion, and echo the ID
///
/// Use with `axum::middleware::from_fn(request_id_middleware)`.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(RequestId::from_header)
        .unwrap_or_else(RequestId::generate);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let span = create_request_span(&method, &path, &request_id);
    req.extensions_mut().insert(request_id.clone());

    let started = Instant::now();
    let response = next.run(req).instrument(span.clone()).await;
    let mut response = stamp_error_body(response, &request_id);
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let status = response.status().as_u16();

    span.record("status_code", status);
    span.record("duration_ms", duration_ms);
    span.in_scope(|| {
        AppLogger::log_api_request(&method, &path, status, duration_ms, request_id.as_str());
    });

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
