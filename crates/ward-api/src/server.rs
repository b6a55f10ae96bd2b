// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Gateway server and router assembly.
//!
//! Routing declares the access-control chain per route group: public,
//! authenticated, and authenticated + admin. Authorization always runs on
//! the already-authenticated subject, so the auth layer is the outermost of
//! the two.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{any, delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::config::GatewayConfig;
use crate::error::{ApiError, ApiResult};
use crate::handlers;
use crate::middleware::{AuthLayer, RequireLayer};
use crate::proxy;
use crate::state::AppState;

// =============================================================================
// Gateway
// =============================================================================

/// The gateway HTTP server.
pub struct Gateway {
    state: AppState,
    config: Arc<GatewayConfig>,
}

impl Gateway {
    /// Creates a gateway over the given state.
    pub fn new(state: AppState) -> Self {
        let config = state.config.clone();
        Self { state, config }
    }

    /// Builds the router with all routes and middleware.
    pub fn router(&self) -> Router {
        let auth = AuthLayer::new(self.state.tokens.clone());
        let admin = RequireLayer::role(self.state.evaluator.clone(), "admin");

        let public = Router::new()
            .route("/ping", get(handlers::ping))
            .route("/signup", post(handlers::signup))
            .route("/login", post(handlers::login));

        let authenticated = Router::new()
            .route("/profile", get(handlers::profile))
            .route("/reviews", any(proxy::forward_review))
            .route("/reviews/{*rest}", any(proxy::forward_review))
            .route_layer(auth.clone());

        let admin_routes = Router::new()
            .route("/roles", get(handlers::list_roles).post(handlers::create_role))
            .route(
                "/roles/{id}",
                get(handlers::get_role)
                    .put(handlers::update_role)
                    .delete(handlers::delete_role),
            )
            .route("/roles/{id}/permissions", get(handlers::role_permissions))
            .route(
                "/roles/{id}/permissions/{permission_id}",
                post(handlers::grant_permission).delete(handlers::revoke_permission),
            )
            .route(
                "/permissions",
                get(handlers::list_permissions).post(handlers::create_permission),
            )
            .route(
                "/permissions/{id}",
                get(handlers::get_permission)
                    .put(handlers::update_permission)
                    .delete(handlers::delete_permission),
            )
            .route("/users", get(handlers::list_users))
            .route("/users/{id}", delete(handlers::delete_user))
            .route("/users/{id}/roles", get(handlers::user_roles))
            .route(
                "/users/{id}/roles/{role_id}",
                post(handlers::assign_role).delete(handlers::remove_role),
            )
            .route("/users/{id}/permissions", get(handlers::user_permissions))
            // Authorization runs on the authenticated subject, so the auth
            // layer must be outermost (route_layer applies last-added first).
            .route_layer(admin)
            .route_layer(auth);

        let middleware_stack = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(self.config.request_timeout))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );

        Router::new()
            .merge(public)
            .merge(authenticated)
            .merge(admin_routes)
            .layer(middleware_stack)
            .with_state(self.state.clone())
    }

    /// Runs the server until the process is stopped.
    pub async fn run(self) -> ApiResult<()> {
        let signal = std::future::pending();
        self.run_with_shutdown(signal).await
    }

    /// Runs the server with graceful shutdown.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let router = self.router();

        info!("Starting gateway on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to bind {addr}: {e}")))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {e}")))?;

        info!("Gateway shutdown complete");

        Ok(())
    }

    /// Returns the configured listen address.
    pub fn addr(&self) -> SocketAddr {
        self.config.socket_addr()
    }
}

// =============================================================================
// Tests
// =============================================================================
