// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Gateway Integration Tests
//!
//! Router-level tests of the access-control chain and the admin surface:
//!
//! - `test_chain_*`: authenticate-then-authorize short-circuiting
//! - `test_roles_*` / `test_permissions_*` / `test_users_*`: the admin
//!   management surface, including the affected-row not-found contract

use axum::http::StatusCode;
use ward_tests::common::harness::{body_json, TestGateway};

// =============================================================================
// Access-Control Chain
// =============================================================================

#[tokio::test]
async fn test_chain_admin_route_without_token_is_401() {
    let gateway = TestGateway::seeded().await;

    let response = gateway.request("GET", "/roles", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_chain_admin_route_with_non_admin_token_is_403() {
    let gateway = TestGateway::seeded().await;

    let token = gateway.token_for(8, "nobody@example.com");
    let response = gateway.request("GET", "/roles", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn test_chain_admin_route_with_admin_token_succeeds() {
    let gateway = TestGateway::seeded().await;

    let token = gateway.token_for(7, "admin@example.com");
    let response = gateway.request("GET", "/roles", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert!(json["data"].as_array().unwrap().len() >= 2);
}

#[tokio::test]
async fn test_chain_store_outage_denies_rather_than_allows() {
    let gateway = TestGateway::seeded().await;
    let token = gateway.token_for(7, "admin@example.com");

    gateway.scenario.directory.fail_everything();

    let response = gateway.request("GET", "/roles", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// =============================================================================
// Role Management
// =============================================================================

#[tokio::test]
async fn test_roles_crud_round_trip() {
    let gateway = TestGateway::seeded().await;
    let token = gateway.token_for(7, "admin@example.com");

    // Create.
    let response = gateway
        .request_json(
            "POST",
            "/roles",
            Some(&token),
            serde_json::json!({"name": "auditor", "description": "Read-only audit access"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let role_id = created["data"]["id"].as_i64().unwrap();

    // Update.
    let response = gateway
        .request_json(
            "PUT",
            &format!("/roles/{role_id}"),
            Some(&token),
            serde_json::json!({"name": "auditor", "description": "Audit access"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["description"], "Audit access");

    // Delete.
    let response = gateway
        .request("DELETE", &format!("/roles/{role_id}"), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Gone.
    let response = gateway
        .request("GET", &format!("/roles/{role_id}"), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_roles_delete_absent_role_is_404() {
    let gateway = TestGateway::seeded().await;
    let token = gateway.token_for(7, "admin@example.com");

    let response = gateway.request("DELETE", "/roles/99", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");

    // No state change: the seeded roles are untouched.
    let response = gateway.request("GET", "/roles", Some(&token)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_roles_duplicate_name_is_409() {
    let gateway = TestGateway::seeded().await;
    let token = gateway.token_for(7, "admin@example.com");

    let response = gateway
        .request_json(
            "POST",
            "/roles",
            Some(&token),
            serde_json::json!({"name": "admin"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// =============================================================================
// Role Permissions
// =============================================================================

#[tokio::test]
async fn test_permissions_grant_and_revoke() {
    let gateway = TestGateway::seeded().await;
    let token = gateway.token_for(7, "admin@example.com");
    let moderator = gateway.scenario.moderator_role.id;
    let permission = gateway.scenario.delete_roles.id;

    // Grant; granting twice stays a no-op.
    for _ in 0..2 {
        let response = gateway
            .request(
                "POST",
                &format!("/roles/{moderator}/permissions/{permission}"),
                Some(&token),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = gateway
        .request("GET", &format!("/roles/{moderator}/permissions"), Some(&token))
        .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Revoke; a second revoke reports not-found.
    let response = gateway
        .request(
            "DELETE",
            &format!("/roles/{moderator}/permissions/{permission}"),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = gateway
        .request(
            "DELETE",
            &format!("/roles/{moderator}/permissions/{permission}"),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_permissions_listing_absent_role_is_404() {
    let gateway = TestGateway::seeded().await;
    let token = gateway.token_for(7, "admin@example.com");

    let response = gateway
        .request("GET", "/roles/99/permissions", Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// User Administration
// =============================================================================

#[tokio::test]
async fn test_users_assign_and_remove_role() {
    let gateway = TestGateway::seeded().await;
    let token = gateway.token_for(7, "admin@example.com");
    let moderator = gateway.scenario.moderator_role.id;

    // Assign the moderator role to the role-less user.
    let response = gateway
        .request("POST", &format!("/users/8/roles/{moderator}"), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = gateway.request("GET", "/users/8/roles", Some(&token)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["name"], "moderator");

    // Remove it; removing again is a 404.
    let response = gateway
        .request("DELETE", &format!("/users/8/roles/{moderator}"), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = gateway
        .request("DELETE", &format!("/users/8/roles/{moderator}"), Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_users_effective_permissions_follow_assignment() {
    let gateway = TestGateway::seeded().await;
    let token = gateway.token_for(7, "admin@example.com");
    let admin_role = gateway.scenario.admin_role.id;

    // Before assignment the user has nothing.
    let response = gateway
        .request("GET", "/users/8/permissions", Some(&token))
        .await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    // Assigning admin lifts its permission set onto the user.
    gateway
        .request("POST", &format!("/users/8/roles/{admin_role}"), Some(&token))
        .await;

    let response = gateway
        .request("GET", "/users/8/permissions", Some(&token))
        .await;
    let json = body_json(response).await;
    let permissions = json["data"].as_array().unwrap();
    assert_eq!(permissions.len(), 1);
    assert_eq!(permissions[0]["resource"], "roles");
    assert_eq!(permissions[0]["action"], "delete");
}

#[tokio::test]
async fn test_users_listing_never_exposes_password_hashes() {
    let gateway = TestGateway::seeded().await;
    let token = gateway.token_for(7, "admin@example.com");

    let response = gateway.request("GET", "/users", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    for user in json["data"].as_array().unwrap() {
        assert!(user.get("password_hash").is_none());
    }
}

#[tokio::test]
async fn test_users_delete_absent_user_is_404() {
    let gateway = TestGateway::seeded().await;
    let token = gateway.token_for(7, "admin@example.com");

    let response = gateway.request("DELETE", "/users/99", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
