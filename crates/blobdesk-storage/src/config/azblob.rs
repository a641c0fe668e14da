//! Azure Blob Storage configuration.

use serde::{Deserialize, Serialize};

/// Azure Blob Storage container settings.
///
/// Authenticates with the account key when set, otherwise with the SAS token.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AzureBlobConfig {
    /// Container holding the objects; plays the role of the bucket.
    pub container: String,
    /// Storage account owning the container.
    pub account_name: String,
    /// Shared account key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_key: Option<String>,
    /// Shared access signature, without the leading `?`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sas_token: Option<String>,
    /// Blob service endpoint, derived from the account name when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Root inside the container all keys are relative to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl AzureBlobConfig {
    /// Creates a configuration for `container` in `account_name`.
    pub fn new(container: impl Into<String>, account_name: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            account_name: account_name.into(),
            account_key: None,
            sas_token: None,
            endpoint: None,
            prefix: None,
        }
    }

    /// Sets the shared account key.
    pub fn with_account_key(mut self, account_key: impl Into<String>) -> Self {
        self.account_key = Some(account_key.into());
        self
    }

    /// Sets a shared access signature.
    pub fn with_sas_token(mut self, sas_token: impl Into<String>) -> Self {
        let sas_token = sas_token.into();
        self.sas_token = Some(sas_token.trim_start_matches('?').to_owned());
        self
    }

    /// Overrides the blob service endpoint (Azurite, sovereign clouds).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the root inside the container.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Returns the blob service endpoint for the account.
    pub fn endpoint_url(&self) -> String {
        match self.endpoint {
            Some(ref endpoint) => endpoint.clone(),
            None => format!("https://{}.blob.core.windows.net", self.account_name),
        }
    }
}

impl std::fmt::Debug for AzureBlobConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureBlobConfig")
            .field("container", &self.container)
            .field("account_name", &self.account_name)
            .field("account_key", &self.account_key.as_ref().map(|_| "<redacted>"))
            .field("sas_token", &self.sas_token.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("prefix", &self.prefix)
            .finish()
    }
}
