//! Typed error handling for the donor API
//!
//! Store implementations return [`StoreError`]; handlers return [`ApiError`],
//! which wraps store failures together with request and validation problems
//! and knows how to render itself as an HTTP response.
//!
//! # Error Categories
//!
//! - [`StoreError`]: missing records, uniqueness conflicts, backend failures
//! - [`RequestError`]: malformed bodies and path parameters
//! - [`ApiError::Validation`]: the aggregated list of field violations
//!
//! # Example
//!
//! ```rust,ignore
//! use donor_registry::prelude::*;
//!
//! match store.find_by_id(42).await {
//!     Ok(donor) => println!("Found: {}", donor.full_name),
//!     Err(StoreError::NotFound { id }) => println!("Donor {} not found", id),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Error type returned by the HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// Failure reported by the donor store
    Store(StoreError),

    /// One message per violated field rule
    Validation(Vec<String>),

    /// Malformed request
    Request(RequestError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Store(e) => write!(f, "{}", e),
            ApiError::Validation(_) => write!(f, "Validation failed"),
            ApiError::Request(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Store(e) => Some(e),
            ApiError::Request(e) => Some(e),
            ApiError::Validation(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
    /// Itemized violations, present for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(e) => e.status_code(),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Request(e) => e.status_code(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Store(e) => e.error_code(),
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Request(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        let errors = match self {
            ApiError::Validation(messages) => Some(messages.clone()),
            _ => None,
        };

        ErrorResponse {
            message: self.to_string(),
            errors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(StoreError::Storage { message }) => {
                tracing::error!(code = self.error_code(), %message, "storage failure");
            }
            ApiError::Store(StoreError::Conflict { message }) => {
                tracing::warn!(code = self.error_code(), %message, "donor conflict");
            }
            ApiError::Validation(messages) => {
                tracing::debug!(violations = messages.len(), "donor rejected by validation");
            }
            _ => {}
        }

        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors reported by [`DonorStore`](crate::core::store::DonorStore) implementations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No donor has this id
    NotFound { id: i64 },

    /// A uniqueness constraint was violated
    Conflict { message: String },

    /// Backend failure (connection, query, poisoned lock)
    Storage { message: String },
}

impl StoreError {
    pub fn storage(message: impl Into<String>) -> Self {
        StoreError::Storage {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Conflict {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::Conflict { .. } => StatusCode::CONFLICT,
            StoreError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "DONOR_NOT_FOUND",
            StoreError::Conflict { .. } => "DONOR_CONFLICT",
            StoreError::Storage { .. } => "STORAGE_ERROR",
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound { id } => write!(f, "Donor with id '{}' not found", id),
            StoreError::Conflict { message } => write!(f, "Conflict: {}", message),
            StoreError::Storage { message } => write!(f, "Storage error: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors caused by a malformed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Body absent, empty or `null`
    MissingBody,

    /// Body is not a JSON donor document
    InvalidJson { message: String },

    /// Body could not be read (too large, aborted), with the status axum chose
    BodyRejected { status: StatusCode, message: String },

    /// Path segment is not an integer id
    InvalidId { value: String },

    /// Path id and payload id disagree
    IdMismatch { path_id: i64, body_id: Option<i64> },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::BodyRejected { status, .. } => *status,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::MissingBody => "MISSING_BODY",
            RequestError::InvalidJson { .. } => "INVALID_JSON",
            RequestError::BodyRejected { .. } => "BODY_REJECTED",
            RequestError::InvalidId { .. } => "INVALID_ID",
            RequestError::IdMismatch { .. } => "ID_MISMATCH",
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::MissingBody => write!(f, "Request body is required"),
            RequestError::InvalidJson { message } => {
                write!(f, "Invalid JSON body: {}", message)
            }
            RequestError::BodyRejected { message, .. } => {
                write!(f, "Request body rejected: {}", message)
            }
            RequestError::InvalidId { value } => {
                write!(f, "Invalid donor id '{}'", value)
            }
            RequestError::IdMismatch { path_id, body_id } => match body_id {
                Some(body_id) => write!(
                    f,
                    "ID mismatch: path id '{}' does not match payload id '{}'",
                    path_id, body_id
                ),
                None => write!(
                    f,
                    "ID mismatch: path id '{}' does not match payload without id",
                    path_id
                ),
            },
        }
    }
}

impl std::error::Error for RequestError {}

// =============================================================================
// Conversions
// =============================================================================

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::Request(err)
    }
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Result alias for handlers
pub type ApiResult<T> = Result<T, ApiError>;
