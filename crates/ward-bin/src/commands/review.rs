// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `review` command: start the review service.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;
use ward_review::{PgReviewStore, ReviewConfig, ReviewServer, ReviewState};

use crate::error::{BinError, BinResult};
use crate::shutdown::ShutdownCoordinator;

/// Starts the review service and runs until a shutdown signal arrives.
pub async fn execute() -> BinResult<()> {
    let config = ReviewConfig::from_env();

    info!("Starting WARD review service v{}", ward_review::VERSION);

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| BinError::init(format!("Failed to connect to database: {e}")))?;

    ward_review::store::MIGRATOR
        .run(&pool)
        .await
        .map_err(|e| BinError::init(format!("Failed to run migrations: {e}")))?;

    let state = ReviewState::new(Arc::new(PgReviewStore::new(pool)), config);
    let server = ReviewServer::new(state);
    info!("Review service listening on {}", server.addr());

    let coordinator = ShutdownCoordinator::new();
    let task = tokio::spawn(server.run_with_shutdown(coordinator.shutdown_signal()));

    coordinator.wait_for_shutdown().await;

    task.await
        .map_err(|e| BinError::runtime(format!("Server task failed: {e}")))??;

    Ok(())
}
