// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # ward-review
//!
//! The review service fronted by the WARD gateway.
//!
//! Plain CRUD over hotel/booking reviews. The service never authenticates
//! callers itself: it trusts the `X-User-ID` header the gateway injects
//! after token validation, which is why it must only ever be reachable
//! through the gateway.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod response;
pub mod server;
pub mod store;

pub use config::ReviewConfig;
pub use error::{ReviewError, ReviewResult};
pub use model::Review;
pub use server::{ReviewServer, ReviewState};
pub use store::{PgReviewStore, ReviewStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
