//! Local filesystem configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Local filesystem configuration.
///
/// Buckets are sub-directories of `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FsConfig {
    /// Directory holding one sub-directory per bucket.
    pub root: PathBuf,
    /// Bucket name.
    pub bucket: String,
}

impl FsConfig {
    /// Creates a new filesystem configuration.
    pub fn new(root: impl Into<PathBuf>, bucket: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            bucket: bucket.into(),
        }
    }

    /// Returns the directory backing the bucket.
    pub fn bucket_dir(&self) -> PathBuf {
        self.root.join(&self.bucket)
    }
}
