//! Upload request items.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A local file and the key it is uploaded to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadItem {
    /// Local file to read.
    pub source_path: PathBuf,
    /// Key to write in the bucket.
    pub destination_path: String,
}

impl UploadItem {
    /// Creates a new upload item.
    pub fn new(source_path: impl Into<PathBuf>, destination_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            destination_path: destination_path.into(),
        }
    }
}

impl FromStr for UploadItem {
    type Err = String;

    /// Parses `SOURCE=DESTINATION`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((source, destination)) if !source.is_empty() && !destination.is_empty() => {
                Ok(Self::new(source, destination))
            }
            _ => Err(format!("expected SOURCE=DESTINATION, got '{s}'")),
        }
    }
}
