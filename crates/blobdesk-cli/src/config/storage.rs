//! Storage backend configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result as AnyhowResult, anyhow};
use blobdesk_storage::{
    AzureBlobConfig, DEFAULT_S3_REGION, FsConfig, GcsConfig, S3Config, S3Credentials, StorageConfig,
};
use clap::{Args, ValueEnum};

use crate::TRACING_TARGET_CONFIG;

/// Storage service selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Google Cloud Storage.
    Gcs,
    /// Amazon S3 compatible storage.
    S3,
    /// Azure Blob Storage.
    Azblob,
    /// Local filesystem.
    Fs,
}

/// Storage backend configuration.
///
/// # Environment Variables
///
/// - `BLOBDESK_BACKEND` - Storage service (default: gcs)
/// - `BLOBDESK_BUCKET` - Bucket or container name
/// - `GOOGLE_APPLICATION_CREDENTIALS` - GCS service account key file
/// - `AWS_REGION`, `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` - S3 settings
/// - `AZURE_STORAGE_ACCOUNT`, `AZURE_STORAGE_KEY`, `AZURE_STORAGE_SAS_TOKEN` - Azure settings
/// - `BLOBDESK_FS_ROOT` - Directory holding filesystem buckets
#[derive(Debug, Clone, Args)]
#[must_use = "config does nothing unless you use it"]
pub struct StorageArgs {
    /// Storage service holding the bucket.
    #[arg(long, env = "BLOBDESK_BACKEND", value_enum, default_value_t = BackendKind::Gcs)]
    pub backend: BackendKind,

    /// Bucket (or container) the commands operate on.
    #[arg(short, long, env = "BLOBDESK_BUCKET")]
    pub bucket: String,

    /// Validity of signed download URLs in seconds.
    #[arg(long, env = "BLOBDESK_SIGNED_URL_TTL", default_value_t = 3600)]
    pub signed_url_ttl: u64,

    /// Service account key file for Google Cloud Storage.
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    pub gcs_credential_path: Option<String>,

    /// Custom Google Cloud Storage endpoint.
    #[arg(long, env = "BLOBDESK_GCS_ENDPOINT")]
    pub gcs_endpoint: Option<String>,

    /// S3 region.
    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_S3_REGION)]
    pub s3_region: String,

    /// Custom S3 endpoint (MinIO, R2, ...).
    #[arg(long, env = "BLOBDESK_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// S3 access key ID.
    #[arg(long, env = "AWS_ACCESS_KEY_ID")]
    pub s3_access_key_id: Option<String>,

    /// S3 secret access key.
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub s3_secret_access_key: Option<String>,

    /// Address S3 buckets as virtual hosts of the endpoint.
    #[arg(long, env = "BLOBDESK_S3_VIRTUAL_HOST_STYLE")]
    pub s3_virtual_host_style: bool,

    /// Azure storage account name.
    #[arg(long, env = "AZURE_STORAGE_ACCOUNT")]
    pub azblob_account_name: Option<String>,

    /// Azure storage account key.
    #[arg(long, env = "AZURE_STORAGE_KEY", hide_env_values = true)]
    pub azblob_account_key: Option<String>,

    /// Azure shared access signature, used when no account key is given.
    #[arg(long, env = "AZURE_STORAGE_SAS_TOKEN", hide_env_values = true)]
    pub azblob_sas_token: Option<String>,

    /// Directory holding one sub-directory per filesystem bucket.
    #[arg(long, env = "BLOBDESK_FS_ROOT")]
    pub fs_root: Option<PathBuf>,
}

impl StorageArgs {
    /// Validates that the selected backend has the options it needs.
    pub fn validate(&self) -> AnyhowResult<()> {
        if self.bucket.trim().is_empty() {
            return Err(anyhow!("Bucket name must not be empty"));
        }

        if self.signed_url_ttl == 0 {
            return Err(anyhow!("Signed URL validity must be at least one second"));
        }

        match self.backend {
            BackendKind::S3 => match (&self.s3_access_key_id, &self.s3_secret_access_key) {
                (Some(_), None) | (None, Some(_)) => Err(anyhow!(
                    "Both S3 access key ID and secret access key must be provided together"
                )),
                _ => Ok(()),
            },
            BackendKind::Azblob if self.azblob_account_name.is_none() => {
                Err(anyhow!("Azure Blob Storage requires --azblob-account-name"))
            }
            BackendKind::Fs if self.fs_root.is_none() => {
                Err(anyhow!("The filesystem backend requires --fs-root"))
            }
            _ => Ok(()),
        }
    }

    /// Returns the signed URL validity as a `Duration`.
    #[must_use]
    pub const fn signed_url_ttl(&self) -> Duration {
        Duration::from_secs(self.signed_url_ttl)
    }

    /// Builds the storage configuration for the selected backend.
    ///
    /// Call [`Self::validate`] first; missing required options fall back to
    /// empty values here.
    pub fn to_storage_config(&self) -> StorageConfig {
        match self.backend {
            BackendKind::Gcs => {
                let mut config = GcsConfig::new(&self.bucket);
                if let Some(ref path) = self.gcs_credential_path {
                    config = config.with_credential_path(path);
                }
                if let Some(ref endpoint) = self.gcs_endpoint {
                    config = config.with_endpoint(endpoint);
                }
                StorageConfig::Gcs(config)
            }
            BackendKind::S3 => {
                let mut config = S3Config::new(&self.bucket)
                    .with_region(&self.s3_region)
                    .with_virtual_host_style(self.s3_virtual_host_style);
                if let Some(ref endpoint) = self.s3_endpoint {
                    config = config.with_endpoint(endpoint);
                }
                if let (Some(key_id), Some(secret)) =
                    (&self.s3_access_key_id, &self.s3_secret_access_key)
                {
                    config = config.with_credentials(S3Credentials::new(key_id, secret));
                }
                StorageConfig::S3(config)
            }
            BackendKind::Azblob => {
                let account = self.azblob_account_name.clone().unwrap_or_default();
                let mut config = AzureBlobConfig::new(&self.bucket, account);
                if let Some(ref key) = self.azblob_account_key {
                    config = config.with_account_key(key);
                }
                if let Some(ref sas_token) = self.azblob_sas_token {
                    config = config.with_sas_token(sas_token);
                }
                StorageConfig::AzureBlob(config)
            }
            BackendKind::Fs => {
                let root = self.fs_root.clone().unwrap_or_default();
                StorageConfig::Fs(FsConfig::new(root, &self.bucket))
            }
        }
    }

    /// Logs the storage configuration (no secrets).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            backend = ?self.backend,
            bucket = %self.bucket,
            signed_url_ttl_secs = self.signed_url_ttl,
            gcs_credential_path = ?self.gcs_credential_path,
            fs_root = ?self.fs_root,
            "Storage configuration"
        );
    }
}
