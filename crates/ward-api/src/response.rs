// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Success response envelope.
//!
//! Every response carries the same envelope:
//! `{"status": "success" | "error", "message": ..., "data" | "error": ...}`.
//! The error side is rendered by [`crate::error::ApiError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Success envelope wrapping response data.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `"success"` for this type.
    pub status: String,
    /// Human-readable message.
    pub message: String,
    /// Response payload, omitted for message-only responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Creates a success envelope with data.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Creates a message-only success envelope.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Wrapper that renders an [`ApiResponse`] with `201 Created`.
#[derive(Debug)]
pub struct Created<T>(pub ApiResponse<T>);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::success("User fetched successfully", 42);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "User fetched successfully");
        assert_eq!(json["data"], 42);
    }

    #[test]
    fn test_message_only_envelope_omits_data() {
        let response = ApiResponse::message("Role deleted successfully");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "success");
        assert!(json.get("data").is_none());
    }
}
