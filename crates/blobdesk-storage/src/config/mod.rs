//! Storage configuration types.

mod azblob;
mod fs;
mod gcs;
mod s3;

pub use azblob::AzureBlobConfig;
pub use fs::FsConfig;
pub use gcs::GcsConfig;
use serde::{Deserialize, Serialize};
pub use s3::{DEFAULT_S3_REGION, S3Config, S3Credentials};

/// Storage backend configuration.
///
/// Every variant names the bucket the client binds to and carries its own
/// credential source, so nothing is read from process-wide state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum StorageConfig {
    /// Google Cloud Storage.
    Gcs(GcsConfig),
    /// Amazon S3 compatible storage.
    S3(S3Config),
    /// Azure Blob Storage.
    #[serde(rename = "azblob")]
    AzureBlob(AzureBlobConfig),
    /// Local filesystem.
    Fs(FsConfig),
}

impl StorageConfig {
    /// Returns the backend name as a static string.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Gcs(_) => "gcs",
            Self::S3(_) => "s3",
            Self::AzureBlob(_) => "azblob",
            Self::Fs(_) => "fs",
        }
    }

    /// Returns the bucket (or container) this configuration binds to.
    pub fn bucket(&self) -> &str {
        match self {
            Self::Gcs(c) => &c.bucket,
            Self::S3(c) => &c.bucket,
            Self::AzureBlob(c) => &c.container,
            Self::Fs(c) => &c.bucket,
        }
    }

    /// Returns the same configuration bound to another bucket.
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        match &mut self {
            Self::Gcs(c) => c.bucket = bucket,
            Self::S3(c) => c.bucket = bucket,
            Self::AzureBlob(c) => c.container = bucket,
            Self::Fs(c) => c.bucket = bucket,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_bucket_keeps_credentials() {
        let config = StorageConfig::Gcs(
            GcsConfig::new("invoices").with_credential_path("/etc/keys/gcs.json"),
        );
        let other = config.clone().with_bucket("archive");

        assert_eq!(other.bucket(), "archive");
        let StorageConfig::Gcs(gcs) = other else {
            panic!("backend changed");
        };
        assert_eq!(gcs.credential_path.as_deref(), Some("/etc/keys/gcs.json"));
    }

    #[test]
    fn deserializes_tagged_config() {
        let json = r#"{"type":"azblob","container":"docs","account_name":"acme"}"#;
        let config: StorageConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.backend_name(), "azblob");
        assert_eq!(config.bucket(), "docs");
    }
}
