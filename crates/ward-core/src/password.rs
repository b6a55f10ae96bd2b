// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Credential hashing and verification.

use crate::error::AuthError;

/// One-way credential hasher.
///
/// Wraps bcrypt with a configurable cost factor. Verification is
/// constant-time with respect to the candidate input, and it never fails:
/// both a mismatch and a malformed stored hash yield `false`.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Creates a hasher with the given bcrypt cost factor.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext credential into an opaque string.
    ///
    /// Fails only on internal hashing failure (e.g. randomness exhaustion).
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| AuthError::Hash(e.to_string()))
    }

    /// Verifies a candidate credential against a stored hash.
    pub fn verify(&self, candidate: &str, stored: &str) -> bool {
        bcrypt::verify(candidate, stored).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
