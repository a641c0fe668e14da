//! S3 compatible storage configuration.

use serde::{Deserialize, Serialize};

/// Region used when none is configured; S3 compatible services mostly ignore it.
pub const DEFAULT_S3_REGION: &str = "us-east-1";

fn default_region() -> String {
    DEFAULT_S3_REGION.to_owned()
}

/// Static access key pair.
///
/// Without one the service falls back to its ambient credential chain
/// (environment, shared profile, instance metadata).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Credentials {
    /// Access key ID.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
}

impl S3Credentials {
    /// Creates a key pair.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }
}

impl std::fmt::Debug for S3Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// S3 bucket settings (AWS, MinIO, R2 and other compatible services).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Config {
    /// Bucket name.
    pub bucket: String,
    /// Region the bucket lives in.
    #[serde(default = "default_region")]
    pub region: String,
    /// Service endpoint, for services other than AWS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Static credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<S3Credentials>,
    /// Address the bucket as `bucket.endpoint` instead of `endpoint/bucket`.
    #[serde(default)]
    pub virtual_host_style: bool,
    /// Root inside the bucket all keys are relative to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl S3Config {
    /// Creates a configuration for `bucket` in the default region.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: default_region(),
            endpoint: None,
            credentials: None,
            virtual_host_style: false,
            prefix: None,
        }
    }

    /// Sets the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Points the client at an S3 compatible endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Uses a static key pair instead of the ambient credential chain.
    pub fn with_credentials(mut self, credentials: S3Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Enables virtual-host style bucket addressing.
    pub fn with_virtual_host_style(mut self, enabled: bool) -> Self {
        self.virtual_host_style = enabled;
        self
    }

    /// Sets the root inside the bucket.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}
