// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Access-control middleware for the gateway.
//!
//! Two composable stages, declared per route:
//!
//! - [`AuthLayer`]: bearer-token authentication; failure is a terminal 401
//! - [`RequireLayer`]: RBAC authorization over the authenticated subject;
//!   failure is a terminal 403
//!
//! On success the chain hands the typed [`crate::AuthContext`] to the
//! downstream handler through request extensions.

mod auth;
mod require;

pub use auth::{AuthLayer, AuthMiddleware};
pub use require::{RequireLayer, RequireMiddleware};
