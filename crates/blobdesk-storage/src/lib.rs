#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod backend;
mod client;
mod config;
mod error;
mod path;
mod types;

#[doc(hidden)]
pub mod prelude;

pub use backend::StorageBackend;
pub use client::{BucketClient, DEFAULT_SIGNED_URL_TTL};
pub use config::{
    AzureBlobConfig, DEFAULT_S3_REGION, FsConfig, GcsConfig, S3Config, S3Credentials,
    StorageConfig,
};
pub use error::{StorageError, StorageResult};
pub use types::{
    DirectoryEntry, ListEntry, ListRequest, ListingPage, ObjectLookup, ObjectRecord,
    OperationStatus, UploadItem,
};

/// Tracing target for client lifecycle events.
pub const TRACING_TARGET_CLIENT: &str = "blobdesk_storage::client";

/// Tracing target for object operations.
pub const TRACING_TARGET_OBJECTS: &str = "blobdesk_storage::objects";
