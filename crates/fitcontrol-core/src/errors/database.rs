// ABOUTME: Database error classification for sqlx failures
// ABOUTME: Splits sqlx errors into duplicate-key, not-found, unavailable, and corrupt cases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

//! Typed database errors.
//!
//! The record store never hands raw `sqlx::Error` values to callers. Each
//! failure is classified here so the reconciliation path can recognise a
//! duplicate key, and so transient outages surface as retryable.

use sqlx::Error as SqlxError;
use thiserror::Error;

use super::{AppError, ErrorCode};

/// Classified record store failure
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Insert collided with an existing unique key
    #[error("{context}: unique constraint violated")]
    UniqueViolation {
        /// Operation that failed
        context: String,
    },

    /// Query expected a row and found none
    #[error("{context}: no matching row")]
    NotFound {
        /// Operation that failed
        context: String,
    },

    /// Store unreachable, locked, or timed out
    #[error("{context}: record store unavailable: {reason}")]
    Unavailable {
        /// Operation that failed
        context: String,
        /// Driver-level reason
        reason: String,
    },

    /// Stored value could not be decoded
    #[error("{context}: stored data is corrupt: {reason}")]
    Corrupt {
        /// Operation that failed
        context: String,
        /// Decode failure detail
        reason: String,
    },

    /// Any other query failure
    #[error("{context}: {reason}")]
    Query {
        /// Operation that failed
        context: String,
        /// Driver-level reason
        reason: String,
    },
}

impl DatabaseError {
    /// Classify a `sqlx::Error` raised while performing `context`
    pub fn from_sqlx(context: impl Into<String>, error: &sqlx::Error) -> Self {
        let context = context.into();
        match error {
            SqlxError::Database(db) => {
                let message = db.message();
                if db.is_unique_violation() || message.contains("UNIQUE constraint failed") {
                    Self::UniqueViolation { context }
                } else if message.contains("database is locked") || message.contains("busy") {
                    Self::Unavailable {
                        context,
                        reason: message.to_owned(),
                    }
                } else {
                    Self::Query {
                        context,
                        reason: message.to_owned(),
                    }
                }
            }
            SqlxError::RowNotFound => Self::NotFound { context },
            SqlxError::PoolTimedOut
            | SqlxError::PoolClosed
            | SqlxError::Io(_)
            | SqlxError::Tls(_)
            | SqlxError::Protocol(_)
            | SqlxError::WorkerCrashed => Self::Unavailable {
                context,
                reason: error.to_string(),
            },
            SqlxError::ColumnDecode { .. }
            | SqlxError::Decode(_)
            | SqlxError::ColumnNotFound(_)
            | SqlxError::TypeNotFound { .. } => Self::Corrupt {
                context,
                reason: error.to_string(),
            },
            _ => Self::Query {
                context,
                reason: error.to_string(),
            },
        }
    }

    /// Error code this failure maps to
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UniqueViolation { .. } => ErrorCode::ResourceAlreadyExists,
            Self::NotFound { .. } => ErrorCode::ResourceNotFound,
            Self::Unavailable { .. } => ErrorCode::StoreUnavailable,
            Self::Corrupt { .. } | Self::Query { .. } => ErrorCode::DatabaseError,
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}
