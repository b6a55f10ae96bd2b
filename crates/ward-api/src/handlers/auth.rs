// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Signup, login, and profile handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use ward_core::{Role, StoreError, User};

use crate::error::{ApiError, ApiResult};
use crate::extractors::Auth;
use crate::response::{ApiResponse, Created};
use crate::state::AppState;

// =============================================================================
// Signup
// =============================================================================

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// Display name.
    pub username: String,
    /// Login email, unique.
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
}

impl SignupRequest {
    fn validate(&self) -> ApiResult<()> {
        if self.username.trim().is_empty() {
            return Err(ApiError::validation("username is required"));
        }
        if !self.email.contains('@') {
            return Err(ApiError::validation("email is not a valid address"));
        }
        if self.password.len() < 8 {
            return Err(ApiError::validation(
                "password must be at least 8 characters",
            ));
        }
        Ok(())
    }
}

/// POST /signup
///
/// Creates an account. Public. Duplicate email yields 409.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<Created<User>> {
    request.validate()?;

    let password_hash = state.hasher.hash(&request.password)?;
    let user = state
        .users
        .create(&request.username, &request.email, &password_hash)
        .await?;

    tracing::info!(user_id = user.id, "User created");

    Ok(Created(ApiResponse::success(
        "User created successfully",
        user,
    )))
}

// =============================================================================
// Login
// =============================================================================

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

impl LoginRequest {
    fn validate(&self) -> ApiResult<()> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(ApiError::validation("email and password are required"));
        }
        Ok(())
    }
}

/// Login response payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed identity token.
    pub token: String,
    /// Token type, always `"Bearer"`.
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// POST /login
///
/// Exchanges credentials for a signed token. Public. A missing account and
/// a wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<ApiResponse<LoginResponse>> {
    request.validate()?;

    let user = match state.users.by_email(&request.email).await {
        Ok(user) => user,
        Err(StoreError::NotFound { .. }) => {
            return Err(ApiError::authentication("invalid email or password"));
        }
        Err(e) => return Err(e.into()),
    };

    if !state.hasher.verify(&request.password, &user.password_hash) {
        return Err(ApiError::authentication("invalid email or password"));
    }

    let token = state.tokens.issue(user.id, &user.email)?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(ApiResponse::success(
        "User logged in successfully",
        LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: state.tokens.ttl_secs(),
        },
    ))
}

// =============================================================================
// Profile
// =============================================================================

/// Profile response payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// The authenticated user.
    pub user: User,
    /// Roles assigned to the user. Best-effort: a role-load failure yields
    /// an empty list rather than failing the fetch.
    pub roles: Vec<Role>,
}

/// GET /profile
///
/// Returns the authenticated subject's own record.
pub async fn profile(
    State(state): State<AppState>,
    Auth(ctx): Auth,
) -> ApiResult<ApiResponse<ProfileResponse>> {
    let user = state.users.by_id(ctx.subject_id).await?;

    let roles = match state.authz.roles_of_user(ctx.subject_id).await {
        Ok(roles) => roles,
        Err(e) => {
            tracing::warn!(user_id = ctx.subject_id, error = %e,
                "Failed to load roles for profile, returning partial result");
            Vec::new()
        }
    };

    Ok(ApiResponse::success(
        "User fetched successfully",
        ProfileResponse { user, roles },
    ))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_validation() {
        let valid = SignupRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "long-enough-password".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_username = SignupRequest {
            username: "  ".to_string(),
            ..copy(&valid)
        };
        assert!(empty_username.validate().is_err());

        let bad_email = SignupRequest {
            email: "not-an-email".to_string(),
            ..copy(&valid)
        };
        assert!(bad_email.validate().is_err());

        let short_password = SignupRequest {
            password: "short".to_string(),
            ..copy(&valid)
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_login_validation() {
        let valid = LoginRequest {
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(valid.validate().is_ok());

        let missing = LoginRequest {
            email: String::new(),
            password: "secret".to_string(),
        };
        assert!(missing.validate().is_err());
    }

    fn copy(req: &SignupRequest) -> SignupRequest {
        SignupRequest {
            username: req.username.clone(),
            email: req.email.clone(),
            password: req.password.clone(),
        }
    }
}
