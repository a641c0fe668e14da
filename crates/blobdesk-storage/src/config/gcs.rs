//! Google Cloud Storage configuration.

use serde::{Deserialize, Serialize};

/// Google Cloud Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcsConfig {
    /// Bucket name.
    pub bucket: String,
    /// Path to a service account key file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_path: Option<String>,
    /// Base64 encoded service account key, used instead of a key file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    /// Custom endpoint URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Path prefix within the bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl GcsConfig {
    /// Creates a new GCS configuration.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            credential_path: None,
            credential: None,
            endpoint: None,
            prefix: None,
        }
    }

    /// Sets the service account key file.
    pub fn with_credential_path(mut self, path: impl Into<String>) -> Self {
        self.credential_path = Some(path.into());
        self
    }

    /// Sets the base64 encoded service account key.
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    /// Sets a custom endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the path prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}
