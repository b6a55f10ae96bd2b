// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # ward-core
//!
//! Core crate for the WARD identity and access gateway.
//!
//! This crate provides:
//! - The domain model (users, roles, permissions, and their join relations)
//! - Credential hashing and verification
//! - Token issuing and validation (HMAC-signed, time-bound)
//! - The authorization store (capability traits + Postgres implementation)
//! - The RBAC evaluator that turns store facts into allow/deny decisions
//!
//! No HTTP types appear here; the gateway and the review service build
//! their transport layers on top of this crate.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod model;
pub mod password;
pub mod rbac;
pub mod store;
pub mod token;

pub use error::{AuthError, StoreError, StoreResult};
pub use model::{Permission, Role, RolePermission, User, UserRole};
pub use password::PasswordHasher;
pub use rbac::{Capability, Decision, RbacEvaluator};
pub use store::{
    AssignmentStore, AuthorizationStore, PermissionStore, PgStore, RoleStore, UserStore,
};
pub use token::{Claims, TokenConfig, TokenService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
