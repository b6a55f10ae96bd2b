// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # ward-bin
//!
//! Command-line binary for WARD: runs the identity gateway or the review
//! service, with logging, env configuration, and graceful shutdown.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod shutdown;

pub use error::{BinError, BinResult};
