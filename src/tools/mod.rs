//! Use-case layer between the MCP handlers and the repositories.
//!
//! - **Search**: fuzzy search and type-ahead suggestions
//! - **Contacts**: listing, lookup and the add/update/delete form actions
//! - **Tags**: tag listing with counts and tag management
//! - **Transfer**: CSV/JSON import and export

pub mod contacts;
pub mod search;
pub mod tags;
pub mod transfer;

pub use contacts::{
    ContactCategory, ContactTools, ListContactsParams, SortOrder, UpdateContactParams,
};
pub use search::{filter_by_tags, SearchHit, SearchParams, SearchResponse, SearchTools};
pub use tags::{tag_counts, TagSummary, TagTools};
pub use transfer::{ExportResponse, ImportSummary, TransferTools, EXPORT_PREFIX};
