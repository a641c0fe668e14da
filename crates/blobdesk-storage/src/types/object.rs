//! Object and directory records.

use opendal::Metadata;
use serde::{Deserialize, Serialize};

use crate::path::{SEPARATOR, format_timestamp, leaf_name};

/// Metadata of one stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Last key segment.
    pub name: String,
    /// Full object key.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type, if the backend reports one.
    pub content_type: Option<String>,
    /// Creation time, if the backend reports one.
    pub time_created: Option<String>,
    /// Last modification time.
    pub time_updated: Option<String>,
    /// Whether the key denotes a directory marker.
    pub is_directory: bool,
    /// Pre-authenticated download URL, only set by single object lookups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_url: Option<String>,
}

impl ObjectRecord {
    /// Builds a record from backend metadata.
    pub(crate) fn from_metadata(path: &str, metadata: &Metadata) -> Self {
        let time_updated = metadata
            .last_modified()
            .and_then(|dt| jiff::Timestamp::from_second(dt.timestamp()).ok())
            .map(format_timestamp);

        Self {
            name: leaf_name(path).to_owned(),
            path: path.to_owned(),
            size: metadata.content_length(),
            content_type: metadata.content_type().map(str::to_owned),
            time_created: None,
            time_updated,
            is_directory: metadata.is_dir() || path.ends_with(SEPARATOR),
            signed_url: None,
        }
    }

    /// Attaches a signed download URL.
    pub(crate) fn with_signed_url(mut self, signed_url: Option<String>) -> Self {
        self.signed_url = signed_url;
        self
    }
}

/// Synthetic directory produced by a delimiter listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Prefix relative to the listed folder, including the trailing separator.
    pub name: String,
    /// Full prefix.
    pub full_name: String,
}

impl DirectoryEntry {
    pub(crate) fn new(full_name: &str, folder: &str) -> Self {
        Self {
            name: full_name
                .strip_prefix(folder)
                .unwrap_or(full_name)
                .to_owned(),
            full_name: full_name.to_owned(),
        }
    }
}

/// One entry of a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListEntry {
    /// Sub-folder of the listed folder.
    Directory(DirectoryEntry),
    /// Stored object.
    Object(ObjectRecord),
}

impl ListEntry {
    /// Returns the display name of the entry.
    pub fn name(&self) -> &str {
        match self {
            Self::Directory(dir) => &dir.name,
            Self::Object(object) => &object.name,
        }
    }

    /// Returns the full key or prefix of the entry.
    pub fn path(&self) -> &str {
        match self {
            Self::Directory(dir) => &dir.full_name,
            Self::Object(object) => &object.path,
        }
    }

    /// Returns whether the entry is a directory.
    pub fn is_directory(&self) -> bool {
        match self {
            Self::Directory(_) => true,
            Self::Object(object) => object.is_directory,
        }
    }

    /// Returns the object record, if this entry is one.
    pub fn as_object(&self) -> Option<&ObjectRecord> {
        match self {
            Self::Object(object) => Some(object),
            Self::Directory(_) => None,
        }
    }
}

/// Outcome of a single object lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "object", rename_all = "snake_case")]
pub enum ObjectLookup {
    /// The object exists.
    Found(ObjectRecord),
    /// No object is stored under the key.
    NotFound,
}

impl ObjectLookup {
    /// Returns whether the object exists.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Converts into the record, if found.
    pub fn into_found(self) -> Option<ObjectRecord> {
        match self {
            Self::Found(object) => Some(object),
            Self::NotFound => None,
        }
    }
}
