// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Custom extractors for gateway handlers.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::context::AuthContext;
use crate::error::ApiError;

// =============================================================================
// Auth Extractor
// =============================================================================

/// Extractor for authenticated requests.
///
/// Pulls the [`AuthContext`] out of the request extensions. Returns 401 if
/// the authentication middleware did not run or did not attach a context.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(Auth(ctx): Auth) -> impl IntoResponse {
///     format!("Hello, user {}", ctx.subject_id)
/// }
/// ```
pub struct Auth(pub AuthContext);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(Auth)
            .ok_or_else(|| ApiError::authentication("Authentication required"))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use axum::http::Request;
    use uuid::Uuid;

    use super::*;

    #[tokio::test]
    async fn test_auth_extractor_with_context() {
        let mut req = Request::builder().uri("/test").body(()).unwrap();
        req.extensions_mut().insert(AuthContext {
            subject_id: 7,
            email: "admin@example.com".to_string(),
            request_id: Uuid::now_v7(),
        });

        let (mut parts, _) = req.into_parts();
        let Auth(ctx) = Auth::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(ctx.subject_id, 7);
    }

    #[tokio::test]
    async fn test_auth_extractor_without_context_rejects() {
        let req = Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _) = req.into_parts();

        let result = Auth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::Authentication { .. })));
    }
}
