// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # ward-tests
//!
//! Integration tests and shared test infrastructure for WARD.
//!
//! The `common` module provides in-memory store implementations with error
//! injection, seeded RBAC fixtures, and a gateway harness for router-level
//! tests. The tests themselves live in `tests/`.

pub mod common;
