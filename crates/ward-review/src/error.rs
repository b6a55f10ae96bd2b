// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Review service errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use ward_core::StoreError;

/// Result type alias for review service operations.
pub type ReviewResult<T> = Result<T, ReviewError>;

/// Review service error with HTTP status code mapping.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Malformed or missing input (400).
    #[error("Validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },

    /// The trusted identity header is missing or unusable (401). This means
    /// the request bypassed the gateway.
    #[error("Identity error: {message}")]
    Identity {
        /// Error message.
        message: String,
    },

    /// Entity absent (404).
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// Storage failure (500; not-found passes through to 404).
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Unexpected failure (500).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl ReviewError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an identity error.
    pub fn identity(message: impl Into<String>) -> Self {
        Self::Identity {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReviewError::Validation { .. } => StatusCode::BAD_REQUEST,
            ReviewError::Identity { .. } => StatusCode::UNAUTHORIZED,
            ReviewError::NotFound { .. } => StatusCode::NOT_FOUND,
            ReviewError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ReviewError::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            ReviewError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ReviewError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            ReviewError::Validation { .. } => "Validation failed",
            ReviewError::Identity { .. } => "Trusted identity missing",
            ReviewError::NotFound { .. } => "Resource not found",
            ReviewError::Store(StoreError::NotFound { .. }) => "Resource not found",
            ReviewError::Store(StoreError::Conflict(_)) => "Conflict",
            ReviewError::Store(_) => "Storage failure",
            ReviewError::Internal { .. } => "Internal server error",
        }
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %detail, status = %status, "Request failed");
        } else {
            tracing::debug!(error = %detail, status = %status, "Request rejected");
        }

        let body = json!({
            "status": "error",
            "message": self.summary(),
            "error": detail,
        });

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ReviewError::validation("bad rating").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ReviewError::identity("missing header").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ReviewError::not_found("review 5").status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_store_not_found_is_404() {
        let err: ReviewError = StoreError::not_found("review 5").into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
