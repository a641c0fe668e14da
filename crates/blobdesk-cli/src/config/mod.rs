//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── storage: StorageArgs  # Backend, bucket, credentials
//! └── command: Command      # Bucket operation to run
//! ```
//!
//! All storage options can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! blobdesk --bucket invoices info reports/2024/summary.pdf
//!
//! # Or via environment variables
//! BLOBDESK_BUCKET=invoices blobdesk info reports/2024/summary.pdf
//! ```

mod storage;

use std::process;

use anyhow::Context;
use clap::Parser;
pub use storage::{BackendKind, StorageArgs};

use crate::command::Command;
use crate::TRACING_TARGET_STARTUP;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "blobdesk")]
#[command(about = "Bucket-scoped object storage operations")]
#[command(version)]
pub struct Cli {
    /// Storage backend and bucket configuration.
    #[clap(flatten)]
    pub storage: StorageArgs,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// Ensures .env files are loaded before clap parses arguments, so their
    /// values act as defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.storage
            .validate()
            .context("invalid storage configuration")?;
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            features = ?Self::enabled_features(),
            "Build information"
        );

        self.storage.log();
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [
            cfg!(feature = "gcs").then_some("gcs"),
            cfg!(feature = "s3").then_some("s3"),
            cfg!(feature = "azblob").then_some("azblob"),
            cfg!(feature = "fs").then_some("fs"),
            cfg!(feature = "dotenv").then_some("dotenv"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
