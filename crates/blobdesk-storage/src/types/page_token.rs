//! Opaque page tokens.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

/// Listing position carried inside a page token.
///
/// The token pins the folder and mode it was issued for, so a token cannot
/// silently page through a different listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PageCursor {
    #[serde(rename = "f")]
    pub folder: String,
    #[serde(rename = "r")]
    pub recursive: bool,
    #[serde(rename = "o")]
    pub offset: usize,
}

impl PageCursor {
    /// Encodes the cursor into a URL-safe token.
    pub fn encode(&self) -> StorageResult<String> {
        let json = serde_json::to_vec(self)
            .map_err(|e| StorageError::invalid_page_token(e.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Decodes a token and checks it belongs to the given listing.
    pub fn decode(token: &str, folder: &str, recursive: bool) -> StorageResult<Self> {
        let json = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| StorageError::invalid_page_token(e.to_string()))?;
        let cursor: Self = serde_json::from_slice(&json)
            .map_err(|e| StorageError::invalid_page_token(e.to_string()))?;

        if cursor.folder != folder || cursor.recursive != recursive {
            return Err(StorageError::invalid_page_token(format!(
                "token was issued for folder '{}' (recursive: {})",
                cursor.folder, cursor.recursive
            )));
        }

        Ok(cursor)
    }
}
