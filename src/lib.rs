//! Tria Contacts - a local address book with fuzzy search, served over MCP.
//!
//! Contacts and tags live in JSON files on disk. Searching ranks exact
//! substring matches first, then name-prefix matches, then typo-tolerant
//! Levenshtein matches.
//!
//! # Architecture
//!
//! - **models**: Contacts and tags as persisted
//! - **domain**: Value objects and record validation
//! - **matching**: Fuzzy search, ranking, suggestions and highlighting
//! - **repositories**: File-backed contact and tag stores with data migration
//! - **import_export**: CSV and JSON transfer formats
//! - **tools**: Use cases combining the stores and the search engine
//! - **server**: MCP protocol server
//! - **config**, **error**, **observability**: Ambient plumbing
//!
//! # Example
//!
//! ```
//! use tria_contacts::matching::{search, SearchOptions};
//! use tria_contacts::Contact;
//!
//! let contacts = vec![
//!     Contact::new(1, "Alice Johnson", "alice@example.com", "555-0101"),
//!     Contact::new(2, "Bob Smith", "bob@example.com", "555-0102"),
//! ];
//!
//! let found = search(&contacts, "alice jonson", &SearchOptions::default());
//! assert_eq!(found[0].name, "Alice Johnson");
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod import_export;
pub mod matching;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod server;
pub mod tools;

pub use config::Config;
pub use error::{ConfigError, ImportError, StoreError};
pub use matching::{search, suggest, MatchType, SearchOptions, SearchResult};
pub use models::{Contact, Tag};
pub use server::TriaMcpServer;
pub use tools::{ContactTools, SearchTools, TagTools, TransferTools};
