// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Trusted-identity extraction.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::ReviewError;

/// The identity header the gateway injects after token validation.
pub const X_USER_ID: &str = "x-user-id";

/// Extractor for the gateway-asserted user id.
///
/// The review service performs no authentication of its own: the gateway
/// strips any caller-supplied value of this header and replaces it with the
/// id from the validated token, so its presence is proof the request came
/// through the trusted boundary.
pub struct TrustedUser(pub i64);

impl<S> FromRequestParts<S> for TrustedUser
where
    S: Send + Sync,
{
    type Rejection = ReviewError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(X_USER_ID)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
            .map(TrustedUser)
            .ok_or_else(|| ReviewError::identity("missing or invalid X-User-ID header"))
    }
}

// =============================================================================
// Tests
// =============================================================================
