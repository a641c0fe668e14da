//! Prelude module for convenient imports.

pub use crate::client::BucketClient;
pub use crate::config::StorageConfig;
pub use crate::error::{StorageError, StorageResult};
pub use crate::types::{ListEntry, ListRequest, ListingPage, ObjectLookup, ObjectRecord};
