// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Gateway handlers.
//!
//! - [`auth`]: signup, login, profile
//! - [`roles`]: role CRUD and role-permission grants
//! - [`permissions`]: permission CRUD
//! - [`users`]: user administration and user-role assignment
//! - [`health`]: liveness

mod auth;
mod health;
mod permissions;
mod roles;
mod users;

pub use auth::*;
pub use health::*;
pub use permissions::*;
pub use roles::*;
pub use users::*;
