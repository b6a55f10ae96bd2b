// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Authentication Integration Tests
//!
//! Token and credential round-trip properties:
//!
//! - `test_token_*`: issue/validate round trips and failure modes
//! - `test_password_*`: hash/verify round trips
//! - `test_login_*`: the full signup/login/profile flow over the router

use axum::http::StatusCode;
use ward_core::{AuthError, Claims, PasswordHasher, TokenConfig, TokenService};
use ward_tests::common::harness::{body_json, TestGateway, TEST_SECRET};

// =============================================================================
// Token Properties
// =============================================================================

#[test]
fn test_token_round_trip() {
    let service = TokenService::new(TokenConfig::new(TEST_SECRET)).unwrap();

    let token = service.issue(7, "admin@example.com").unwrap();
    let claims = service.validate(&token).unwrap();

    assert_eq!(claims.subject_id().unwrap(), 7);
    assert_eq!(claims.email, "admin@example.com");
}

#[test]
fn test_token_cross_secret_fails_with_invalid_signature() {
    let issuer = TokenService::new(TokenConfig::new("first-secret-of-sufficient-length")).unwrap();
    let validator =
        TokenService::new(TokenConfig::new("second-secret-of-sufficient-length")).unwrap();

    let token = issuer.issue(7, "admin@example.com").unwrap();

    assert!(matches!(
        validator.validate(&token),
        Err(AuthError::InvalidSignature)
    ));
}

#[test]
fn test_token_expiry_is_enforced() {
    let service = TokenService::new(TokenConfig::new(TEST_SECRET)).unwrap();

    let expired = Claims::new(7, "admin@example.com", -3600);
    let token = service.sign(&expired).unwrap();

    assert!(matches!(service.validate(&token), Err(AuthError::Expired)));
}

#[test]
fn test_token_garbage_is_malformed() {
    let service = TokenService::new(TokenConfig::new(TEST_SECRET)).unwrap();

    assert!(matches!(
        service.validate("garbage"),
        Err(AuthError::Malformed)
    ));
    assert!(matches!(
        service.validate("still.not.atoken"),
        Err(AuthError::Malformed)
    ));
}

// =============================================================================
// Password Properties
// =============================================================================

#[test]
fn test_password_round_trip() {
    let hasher = PasswordHasher::new(4);

    let hash = hasher.hash("a-password").unwrap();
    assert!(hasher.verify("a-password", &hash));
    assert!(!hasher.verify("another-password", &hash));
}

#[test]
fn test_password_verify_never_panics_on_garbage() {
    let hasher = PasswordHasher::new(4);

    assert!(!hasher.verify("anything", "garbage-stored-value"));
    assert!(!hasher.verify("", ""));
}

// =============================================================================
// Login Flow
// =============================================================================

#[tokio::test]
async fn test_login_flow_end_to_end() {
    let gateway = TestGateway::seeded().await;

    // Sign up a fresh user.
    let response = gateway
        .request_json(
            "POST",
            "/signup",
            None,
            serde_json::json!({
                "username": "carol",
                "email": "carol@example.com",
                "password": "carols-long-password",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Exchange credentials for a token.
    let response = gateway
        .request_json(
            "POST",
            "/login",
            None,
            serde_json::json!({
                "email": "carol@example.com",
                "password": "carols-long-password",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    let token = json["data"]["token"].as_str().unwrap().to_string();
    assert_eq!(json["data"]["token_type"], "Bearer");

    // Use the token against the authenticated surface.
    let response = gateway.request("GET", "/profile", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["email"], "carol@example.com");
    // The stored hash must never appear in a response.
    assert!(json["data"]["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_with_wrong_password_is_401() {
    let gateway = TestGateway::seeded().await;

    let response = gateway
        .request_json(
            "POST",
            "/login",
            None,
            serde_json::json!({
                "email": "admin@example.com",
                "password": "wrong-password",
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn test_login_with_unknown_email_is_401() {
    let gateway = TestGateway::seeded().await;

    let response = gateway
        .request_json(
            "POST",
            "/login",
            None,
            serde_json::json!({
                "email": "ghost@example.com",
                "password": "whatever-password",
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_duplicate_email_is_409() {
    let gateway = TestGateway::seeded().await;

    let body = serde_json::json!({
        "username": "admin2",
        "email": "admin@example.com",
        "password": "long-enough-password",
    });
    let response = gateway.request_json("POST", "/signup", None, body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_rejects_short_password() {
    let gateway = TestGateway::seeded().await;

    let body = serde_json::json!({
        "username": "dave",
        "email": "dave@example.com",
        "password": "short",
    });
    let response = gateway.request_json("POST", "/signup", None, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_without_token_is_401() {
    let gateway = TestGateway::seeded().await;

    let response = gateway.request("GET", "/profile", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_with_tampered_token_is_401() {
    let gateway = TestGateway::seeded().await;

    let token = gateway.token_for(7, "admin@example.com");
    let tampered = format!("{}x", token);

    let response = gateway.request("GET", "/profile", Some(&tampered)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_includes_roles() {
    let gateway = TestGateway::seeded().await;

    let token = gateway.token_for(7, "admin@example.com");
    let response = gateway.request("GET", "/profile", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let roles = json["data"]["roles"].as_array().unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0]["name"], "admin");
}
