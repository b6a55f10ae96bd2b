// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Review service server and router assembly.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::config::ReviewConfig;
use crate::error::{ReviewError, ReviewResult};
use crate::handlers;
use crate::store::ReviewStore;

// =============================================================================
// ReviewState
// =============================================================================

/// State shared across review handlers.
#[derive(Clone)]
pub struct ReviewState {
    /// Review repository.
    pub store: Arc<dyn ReviewStore>,
    /// Service configuration.
    pub config: Arc<ReviewConfig>,
}

impl ReviewState {
    /// Creates state over the given store and configuration.
    pub fn new(store: Arc<dyn ReviewStore>, config: ReviewConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// ReviewServer
// =============================================================================

/// The review service HTTP server.
pub struct ReviewServer {
    state: ReviewState,
}

impl ReviewServer {
    /// Creates a server over the given state.
    pub fn new(state: ReviewState) -> Self {
        Self { state }
    }

    /// Builds the router.
    ///
    /// The static filter routes are declared alongside `/reviews/{id}`;
    /// the router matches static segments before parameters.
    pub fn router(&self) -> Router {
        Router::new()
            .route(
                "/reviews",
                post(handlers::create_review).get(handlers::list_reviews),
            )
            .route("/reviews/user", get(handlers::reviews_by_user))
            .route("/reviews/hotel", get(handlers::reviews_by_hotel))
            .route("/reviews/booking", get(handlers::reviews_by_booking))
            .route(
                "/reviews/{id}",
                get(handlers::get_review)
                    .put(handlers::update_review)
                    .delete(handlers::delete_review),
            )
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(self.state.config.request_timeout))
            .with_state(self.state.clone())
    }

    /// Runs the server with graceful shutdown.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ReviewResult<()> {
        let addr = self.state.config.socket_addr();
        let router = self.router();

        info!("Starting review service on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ReviewError::Internal {
                message: format!("Failed to bind {addr}: {e}"),
            })?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ReviewError::Internal {
                message: format!("Server error: {e}"),
            })?;

        info!("Review service shutdown complete");

        Ok(())
    }

    /// Returns the configured listen address.
    pub fn addr(&self) -> SocketAddr {
        self.state.config.socket_addr()
    }
}

// =============================================================================
// Tests
// =============================================================================
