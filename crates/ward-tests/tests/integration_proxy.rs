// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Proxy Integration Tests
//!
//! End-to-end tests of identity propagation: the gateway in front of a
//! live review service bound to an ephemeral port. The critical property:
//! the upstream only ever sees the token-derived identity, no matter what
//! the caller puts in `X-User-ID`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use ward_review::{ReviewConfig, ReviewServer, ReviewState};
use ward_tests::common::harness::{body_json, TestGateway};
use ward_tests::common::mocks::MemoryReviewStore;

/// Binds a review service to an ephemeral port and returns its address.
async fn spawn_review_service() -> SocketAddr {
    let state = ReviewState::new(Arc::new(MemoryReviewStore::new()), ReviewConfig::default());
    let router = ReviewServer::new(state).router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn review_body() -> serde_json::Value {
    serde_json::json!({
        "booking_id": 10,
        "hotel_id": 20,
        "comment": "Forwarded through the gateway",
        "rating": 4,
    })
}

#[tokio::test]
async fn test_proxy_forwards_token_identity() {
    let upstream = spawn_review_service().await;
    let gateway = TestGateway::with_upstream(&format!("http://{upstream}")).await;
    let token = gateway.token_for(7, "admin@example.com");

    let response = gateway
        .request_json("POST", "/reviews", Some(&token), review_body())
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["user_id"], 7);
}

#[tokio::test]
async fn test_proxy_strips_spoofed_identity_header() {
    let upstream = spawn_review_service().await;
    let gateway = TestGateway::with_upstream(&format!("http://{upstream}")).await;
    let token = gateway.token_for(7, "admin@example.com");

    // The caller claims to be user 666; only the token's subject may
    // reach the upstream.
    let request = Request::builder()
        .method("POST")
        .uri("/reviews")
        .header("Authorization", format!("Bearer {token}"))
        .header("X-User-ID", "666")
        .header("content-type", "application/json")
        .body(Body::from(review_body().to_string()))
        .unwrap();

    let response = gateway.send(request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], 7);
}

#[tokio::test]
async fn test_proxy_requires_authentication() {
    let upstream = spawn_review_service().await;
    let gateway = TestGateway::with_upstream(&format!("http://{upstream}")).await;

    // Even with a spoofed header, an unauthenticated caller never reaches
    // the upstream.
    let request = Request::builder()
        .method("POST")
        .uri("/reviews")
        .header("X-User-ID", "666")
        .header("content-type", "application/json")
        .body(Body::from(review_body().to_string()))
        .unwrap();

    let response = gateway.send(request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_proxy_round_trips_nested_paths_and_queries() {
    let upstream = spawn_review_service().await;
    let gateway = TestGateway::with_upstream(&format!("http://{upstream}")).await;
    let token = gateway.token_for(7, "admin@example.com");

    // Create one review, then read it back through the filter route.
    let response = gateway
        .request_json("POST", "/reviews", Some(&token), review_body())
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = gateway
        .request("GET", "/reviews/user?user_id=7", Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = gateway
        .request("GET", "/reviews/user?user_id=8", Some(&token))
        .await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_proxy_unreachable_upstream_is_502() {
    // Nothing is listening on this port.
    let gateway = TestGateway::with_upstream("http://127.0.0.1:1").await;
    let token = gateway.token_for(7, "admin@example.com");

    let response = gateway.request("GET", "/reviews", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
