// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! WARD - identity and access gateway.
//!
//! Main binary entry point.

use clap::Parser;

use ward_bin::cli::{Cli, Commands};
use ward_bin::commands;
use ward_bin::error::report_error_and_exit;
use ward_bin::logging::init_logging;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; environment defaults apply.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.effective_log_level(), cli.log_format);

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run::execute().await,
        Commands::Review => commands::review::execute().await,
        Commands::Version => commands::version::execute(),
    };

    if let Err(e) = result {
        report_error_and_exit(e);
    }
}
