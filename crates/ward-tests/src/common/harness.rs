// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Gateway test harness.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use tower::ServiceExt;
use ward_api::{AppState, Gateway, GatewayConfig};
use ward_core::{PasswordHasher, TokenConfig, TokenService};

use crate::common::fixtures::{Scenario, TEST_BCRYPT_COST};

/// Signing secret shared by every harness instance.
pub const TEST_SECRET: &str = "test-secret-key-that-is-long-enough-for-testing";

/// A gateway wired to an in-memory directory, driven without a socket.
pub struct TestGateway {
    /// The assembled router.
    pub router: Router,
    /// The token service, for minting test tokens.
    pub tokens: Arc<TokenService>,
    /// The seeded scenario behind the router.
    pub scenario: Scenario,
}

impl TestGateway {
    /// Builds a gateway over a freshly seeded scenario.
    pub async fn seeded() -> Self {
        Self::with_config(GatewayConfig::default()).await
    }

    /// Builds a seeded gateway proxying to the given review upstream.
    pub async fn with_upstream(upstream: &str) -> Self {
        Self::with_config(GatewayConfig::default().with_review_upstream(upstream)).await
    }

    async fn with_config(config: GatewayConfig) -> Self {
        let scenario = Scenario::seeded().await;
        let tokens = Arc::new(TokenService::new(TokenConfig::new(TEST_SECRET)).unwrap());

        let config = config.with_token(TokenConfig::new(TEST_SECRET));
        let state = AppState::builder()
            .config(config)
            .tokens(tokens.clone())
            .hasher(Arc::new(PasswordHasher::new(TEST_BCRYPT_COST)))
            .store(scenario.directory.clone())
            .build()
            .unwrap();

        let router = Gateway::new(state).router();

        Self {
            router,
            tokens,
            scenario,
        }
    }

    /// Mints a token for the given seeded user.
    pub fn token_for(&self, user_id: i64, email: &str) -> String {
        self.tokens.issue(user_id, email).unwrap()
    }

    /// Sends a request through the router.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Sends a bodyless request with an optional bearer token.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Sends a JSON request with an optional bearer token.
    pub async fn request_json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }
}

/// Reads a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
