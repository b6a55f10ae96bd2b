// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for authentication and storage.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// AuthError
// =============================================================================

/// Errors produced by the credential verifier and the token service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token's MAC does not verify against the configured secret.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// The token's expiry claim is in the past.
    #[error("Token has expired")]
    Expired,

    /// The token or its payload cannot be decoded.
    #[error("Malformed token")]
    Malformed,

    /// The token service is misconfigured.
    #[error("Token configuration error: {0}")]
    Config(String),

    /// Signing a token failed.
    #[error("Failed to sign token: {0}")]
    Signing(String),

    /// Hashing a credential failed.
    #[error("Failed to hash credential: {0}")]
    Hash(String),
}

// =============================================================================
// StoreError
// =============================================================================

/// Errors produced by the authorization store and repositories.
///
/// Plural queries propagate "no rows" as an empty collection, never as an
/// error; singular queries map it to [`StoreError::NotFound`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The requested entity does not exist.
    #[error("{entity} not found")]
    NotFound {
        /// Description of the missing entity, e.g. `"role 99"`.
        entity: String,
    },

    /// A unique-key constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The query itself failed.
    #[error("Query failed: {0}")]
    Query(String),
}

impl StoreError {
    /// Creates a not-found error for the given entity description.
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(db.to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                StoreError::not_found("referenced record")
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Unavailable("connection pool exhausted".to_string())
            }
            sqlx::Error::Io(e) => StoreError::Unavailable(e.to_string()),
            sqlx::Error::Tls(e) => StoreError::Unavailable(e.to_string()),
            other => StoreError::Query(other.to_string()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
