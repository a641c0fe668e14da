//! Paginated listing request and response.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use super::ListEntry;

/// Parameters of a metadata listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    /// Folder to list; the empty string lists the bucket root.
    #[serde(default)]
    pub folder: String,
    /// Maximum number of entries per page, unlimited when unset.
    #[serde(default)]
    pub page_size: Option<NonZeroUsize>,
    /// Token of the page to fetch, the first page when unset.
    #[serde(default)]
    pub page_token: Option<String>,
    /// List every key below the folder instead of grouping sub-folders.
    #[serde(default)]
    pub recursive: bool,
}

impl ListRequest {
    /// Creates a request for the first page of a folder.
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            ..Self::default()
        }
    }

    /// Sets the page size; zero means unlimited.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = NonZeroUsize::new(page_size);
        self
    }

    /// Sets the page token.
    pub fn with_page_token(mut self, page_token: impl Into<String>) -> Self {
        self.page_token = Some(page_token.into());
        self
    }

    /// Enables or disables recursive listing.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}

/// One page of a metadata listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    /// Token this page was fetched with, `None` for the first page.
    pub current_page_token: Option<String>,
    /// Token of the following page, `None` for the last page.
    pub next_page_token: Option<String>,
    /// Directories first, then objects.
    pub objects_info: Vec<ListEntry>,
}

impl ListingPage {
    /// Returns whether another page follows.
    pub fn has_next_page(&self) -> bool {
        self.next_page_token.is_some()
    }
}
