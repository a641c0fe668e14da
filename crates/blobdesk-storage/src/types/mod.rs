//! Records returned by bucket operations.

mod listing;
mod object;
mod page_token;
mod status;
mod upload;

pub use listing::{ListRequest, ListingPage};
pub use object::{DirectoryEntry, ListEntry, ObjectLookup, ObjectRecord};
pub(crate) use page_token::PageCursor;
pub use status::OperationStatus;
pub use upload::UploadItem;
