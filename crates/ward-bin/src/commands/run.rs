// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `run` command: start the identity gateway.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;
use ward_api::{AppState, Gateway, GatewayConfig};
use ward_core::PgStore;

use crate::error::{BinError, BinResult};
use crate::shutdown::ShutdownCoordinator;

/// Starts the gateway and runs until a shutdown signal arrives.
pub async fn execute() -> BinResult<()> {
    let config = GatewayConfig::from_env();

    info!("Starting WARD gateway v{}", ward_core::VERSION);

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect(&config.database_url)
        .await
        .map_err(|e| BinError::init(format!("Failed to connect to database: {e}")))?;

    ward_core::store::MIGRATOR
        .run(&pool)
        .await
        .map_err(|e| BinError::init(format!("Failed to run migrations: {e}")))?;

    let state = AppState::builder()
        .config(config)
        .store(Arc::new(PgStore::new(pool)))
        .build()?;

    let gateway = Gateway::new(state);
    info!("Gateway listening on {}", gateway.addr());

    let coordinator = ShutdownCoordinator::new();
    let server = tokio::spawn(gateway.run_with_shutdown(coordinator.shutdown_signal()));

    coordinator.wait_for_shutdown().await;

    server
        .await
        .map_err(|e| BinError::runtime(format!("Server task failed: {e}")))??;

    Ok(())
}
