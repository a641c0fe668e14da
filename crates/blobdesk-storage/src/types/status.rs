//! Status reports of mutating operations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a mutating operation did to one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OperationStatus {
    /// A local file was written to the bucket.
    Uploaded {
        /// Local source file.
        source: String,
        /// Destination key.
        destination: String,
    },
    /// An object was deleted.
    Deleted {
        /// Deleted key.
        key: String,
    },
    /// Every object under a folder was deleted.
    FolderDeleted {
        /// Normalized folder prefix.
        folder: String,
        /// Number of deleted keys.
        count: usize,
    },
    /// A folder had nothing to delete.
    FolderEmpty {
        /// Normalized folder prefix.
        folder: String,
    },
    /// An object was moved within the bucket.
    Moved {
        /// Former key.
        from: String,
        /// New key.
        to: String,
    },
    /// An object was moved into another bucket.
    MovedAcrossBuckets {
        /// Source bucket.
        from_bucket: String,
        /// Former key.
        from: String,
        /// Destination bucket.
        to_bucket: String,
        /// New key.
        to: String,
    },
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uploaded {
                source,
                destination,
            } => write!(f, "File {source} uploaded to {destination}."),
            Self::Deleted { key } => write!(f, "Deleted file {key}."),
            Self::FolderDeleted { folder, count } => {
                write!(f, "Deleted folder '{folder}' and {count} object(s) in it.")
            }
            Self::FolderEmpty { folder } => {
                write!(f, "Folder '{folder}' is empty or does not exist.")
            }
            Self::Moved { from, to } => write!(f, "Moved file from {from} to {to}."),
            Self::MovedAcrossBuckets {
                from_bucket,
                from,
                to_bucket,
                to,
            } => write!(
                f,
                "Moved file from {from_bucket}/{from} to {to_bucket}/{to}."
            ),
        }
    }
}
