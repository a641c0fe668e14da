#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;
mod telemetry;

use std::process;

use anyhow::Context;
use blobdesk_storage::BucketClient;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "blobdesk_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "blobdesk_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "blobdesk_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            "command completed successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %format!("{error:#}"),
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();
    cli.validate()?;

    let config = cli.storage.to_storage_config();
    let client = BucketClient::new(config.clone())
        .context("failed to create storage client")?
        .with_signed_url_ttl(cli.storage.signed_url_ttl());

    cli.command.execute(&client, &config).await
}
