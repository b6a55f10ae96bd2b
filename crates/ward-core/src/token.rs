// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Token issuing and validation.
//!
//! Tokens are HMAC-signed (HS256) assertions of an authenticated identity,
//! carrying the subject id and email. Expiry is always issued and always
//! enforced at validation.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;

// =============================================================================
// Claims
// =============================================================================

/// Claims embedded in an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id, rendered as a string.
    pub sub: String,

    /// The subject's email address.
    pub email: String,

    /// Expiration time (Unix timestamp). Always present and enforced.
    pub exp: i64,

    /// Issued-at time (Unix timestamp).
    pub iat: i64,

    /// Token id, for log correlation.
    pub jti: String,
}

impl Claims {
    /// Creates claims for a subject, expiring `ttl_secs` from now.
    pub fn new(subject_id: i64, email: impl Into<String>, ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: subject_id.to_string(),
            email: email.into(),
            exp: now + ttl_secs,
            iat: now,
            jti: Uuid::now_v7().to_string(),
        }
    }

    /// Returns the subject id parsed back to its numeric form.
    pub fn subject_id(&self) -> Result<i64, AuthError> {
        self.sub.parse().map_err(|_| AuthError::Malformed)
    }

    /// Returns `true` if the expiry claim is in the past.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

// =============================================================================
// TokenConfig
// =============================================================================

/// Token service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Shared secret for the HMAC. Must be set by the operator.
    #[serde(skip_serializing)]
    pub secret: String,
    /// Token lifetime in seconds.
    pub ttl_secs: i64,
    /// Clock-skew tolerance in seconds applied at validation.
    pub leeway_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            ttl_secs: 3600,
            leeway_secs: 60,
        }
    }
}

impl TokenConfig {
    /// Creates a configuration with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Sets the token lifetime.
    pub fn with_ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::Config(
                "signing secret is not configured".to_string(),
            ));
        }
        if self.secret.len() < 32 {
            tracing::warn!("signing secret is shorter than recommended (32 bytes)");
        }
        Ok(())
    }
}

// =============================================================================
// TokenService
// =============================================================================

/// Issues and validates signed identity tokens.
///
/// The service is a pure function over (token, secret): it holds no mutable
/// state and is constructed once at startup, then shared by reference.
#[derive(Clone)]
pub struct TokenService {
    config: Arc<TokenConfig>,
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl TokenService {
    /// Creates a token service from the given configuration.
    pub fn new(config: TokenConfig) -> Result<Self, AuthError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        validation.set_required_spec_claims(&["exp"]);
        validation.validate_aud = false;

        Ok(Self {
            config: Arc::new(config),
            encoding_key: Arc::new(encoding_key),
            decoding_key: Arc::new(decoding_key),
            validation: Arc::new(validation),
        })
    }

    /// Issues a token for the given subject.
    pub fn issue(&self, subject_id: i64, email: &str) -> Result<String, AuthError> {
        let claims = Claims::new(subject_id, email, self.config.ttl_secs);
        self.sign(&claims)
    }

    /// Signs an explicit set of claims.
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Validates a token and returns its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::Malformed,
            })
    }

    /// Returns the configured token lifetime in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.config.ttl_secs
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_secs", &self.config.ttl_secs)
            .field("leeway_secs", &self.config.leeway_secs)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> TokenConfig {
        TokenConfig::new("test-secret-key-that-is-long-enough-for-testing")
    }

    #[test]
    fn test_issue_and_validate_round_trip() {
        let service = TokenService::new(test_config()).unwrap();

        let token = service.issue(7, "admin@example.com").unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.subject_id().unwrap(), 7);
        assert_eq!(claims.email, "admin@example.com");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_fails_with_invalid_signature() {
        let issuer = TokenService::new(TokenConfig::new("secret-one-for-testing-purposes"))
            .unwrap();
        let validator = TokenService::new(TokenConfig::new("secret-two-for-testing-purposes"))
            .unwrap();

        let token = issuer.issue(1, "a@example.com").unwrap();
        let err = validator.validate(&token).unwrap_err();

        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[test]
    fn test_expired_token_fails_with_expired() {
        let service = TokenService::new(test_config()).unwrap();

        // Expired well past the validation leeway.
        let claims = Claims::new(7, "a@example.com", -3600);
        let token = service.sign(&claims).unwrap();

        let err = service.validate(&token).unwrap_err();
        assert!(matches!(err, AuthError::Expired));
    }

    #[test]
    fn test_garbage_token_fails_with_malformed() {
        let service = TokenService::new(test_config()).unwrap();

        let err = service.validate("not.a.token").unwrap_err();
        assert!(matches!(err, AuthError::Malformed));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let err = TokenService::new(TokenConfig::default()).unwrap_err();
        assert!(matches!(err, AuthError::Config(_)));
    }

    #[test]
    fn test_non_numeric_subject_is_malformed() {
        let claims = Claims {
            sub: "not-a-number".to_string(),
            email: "a@example.com".to_string(),
            exp: Utc::now().timestamp() + 60,
            iat: Utc::now().timestamp(),
            jti: "test".to_string(),
        };

        assert!(matches!(claims.subject_id(), Err(AuthError::Malformed)));
    }
}
