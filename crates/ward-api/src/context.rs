// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Request-scoped authentication context.

use uuid::Uuid;
use ward_core::Claims;

/// The authenticated identity attached to a request.
///
/// Inserted into request extensions by the authentication middleware after
/// token validation and read by handlers and the authorization middleware.
/// This replaces untyped context values with an explicit, typed handoff:
/// downstream code never re-parses the token.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The subject's stable user id, extracted from the validated token.
    pub subject_id: i64,
    /// The subject's email, extracted from the validated token.
    pub email: String,
    /// Request id for log correlation.
    pub request_id: Uuid,
}

impl AuthContext {
    /// Creates a context from validated token claims.
    pub fn new(subject_id: i64, claims: &Claims) -> Self {
        Self {
            subject_id,
            email: claims.email.clone(),
            request_id: Uuid::now_v7(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
