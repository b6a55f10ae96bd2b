// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `version` command.

use crate::error::BinResult;

/// Prints version information for all components.
pub fn execute() -> BinResult<()> {
    println!("ward {}", ward_core::VERSION);
    println!("  ward-core   {}", ward_core::VERSION);
    println!("  ward-api    {}", ward_api::VERSION);
    println!("  ward-review {}", ward_review::VERSION);
    Ok(())
}
