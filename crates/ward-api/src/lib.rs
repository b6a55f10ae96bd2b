// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # ward-api
//!
//! The WARD identity and access gateway.
//!
//! This crate provides the HTTP surface of the identity service plus the
//! access-control middleware chain: bearer-token authentication, per-route
//! RBAC authorization, and the reverse proxy that forwards authenticated
//! requests to the review service with a trusted identity header.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod context;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod proxy;
pub mod response;
pub mod server;
pub mod state;

pub use config::GatewayConfig;
pub use context::AuthContext;
pub use error::{ApiError, ApiResult};
pub use proxy::ReviewProxy;
pub use response::ApiResponse;
pub use server::Gateway;
pub use state::AppState;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
