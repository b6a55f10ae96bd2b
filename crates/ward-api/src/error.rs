// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Gateway error types and HTTP mapping.
//!
//! Repository and auth errors are wrapped with context on the way up and
//! mapped to a status code plus JSON error envelope here, at the HTTP
//! boundary. Nothing is silently swallowed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use ward_core::{AuthError, StoreError};

/// Result type alias for gateway operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// ApiError
// =============================================================================

/// Gateway error with HTTP status code mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input (400).
    #[error("Validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },

    /// Bad, missing, or expired token or credentials (401).
    #[error("Authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// Authenticated but insufficient role/permission (403).
    #[error("Authorization error: {message}")]
    Authorization {
        /// Error message.
        message: String,
    },

    /// Entity absent (404).
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// Duplicate unique key (409).
    #[error("Conflict: {message}")]
    Conflict {
        /// Error message.
        message: String,
    },

    /// The upstream service could not be reached or failed (502).
    #[error("Upstream error: {message}")]
    Upstream {
        /// Error message.
        message: String,
    },

    /// Storage unavailable or query failure (500; not-found and conflict
    /// pass through to 404/409).
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Unexpected failure (500).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message (for logging, not user-facing).
        message: String,
    },
}

impl ApiError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates an upstream error.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Authorization { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the user-facing summary for this error.
    pub fn summary(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "Validation failed",
            ApiError::Authentication { .. } => "Authentication required",
            ApiError::Authorization { .. } => "Insufficient permissions",
            ApiError::NotFound { .. } => "Resource not found",
            ApiError::Conflict { .. } => "Conflict",
            ApiError::Upstream { .. } => "Upstream service error",
            ApiError::Store(StoreError::NotFound { .. }) => "Resource not found",
            ApiError::Store(StoreError::Conflict(_)) => "Conflict",
            ApiError::Store(_) => "Storage failure",
            ApiError::Internal { .. } => "Internal server error",
        }
    }

    /// Returns `true` if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidSignature | AuthError::Expired | AuthError::Malformed => {
                ApiError::authentication(err.to_string())
            }
            other => ApiError::internal(other.to_string()),
        }
    }
}

// =============================================================================
// IntoResponse
// =============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let summary = self.summary();
        let detail = self.to_string();

        if self.is_server_error() {
            tracing::error!(error = %detail, status = %status, "Request failed");
        } else {
            tracing::debug!(error = %detail, status = %status, "Request rejected");
        }

        let body = json!({
            "status": "error",
            "message": summary,
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
            ApiError::validation("bad input").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::authentication("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::authorization("not admin").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::not_found("role 99").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::conflict("duplicate email").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::upstream("connect refused").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_not_found_passes_through_as_404() {
        let err: ApiError = StoreError::not_found("role 99").into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_conflict_passes_through_as_409() {
        let err: ApiError = StoreError::Conflict("duplicate key".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_store_unavailable_is_500() {
        let err: ApiError = StoreError::Unavailable("pool down".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_server_error());
    }

    #[test]
    fn test_auth_errors_map_to_401() {
        let err: ApiError = ward_core::AuthError::Expired.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err: ApiError = ward_core::AuthError::InvalidSignature.into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_auth_errors_map_to_500() {
        let err: ApiError = ward_core::AuthError::Hash("rng".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
