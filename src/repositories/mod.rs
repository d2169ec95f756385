//! Contact and tag storage.
//!
//! Repositories are async traits so the server can share them behind
//! `Arc<dyn ...>`; the file-backed implementations keep each list under one
//! key of a [`JsonFileStore`].

mod json_contact_repository;
mod json_store;
mod json_tag_repository;
pub mod migration;
mod traits;

pub use json_contact_repository::{prepare_new_contact, JsonContactRepository};
pub use json_store::{JsonFileStore, CONTACTS_KEY, TAGS_KEY, VERSION_KEY};
pub use json_tag_repository::{prepare_new_tag, JsonTagRepository};
pub use migration::CURRENT_DATA_VERSION;
pub use traits::{ContactRepository, TagRepository};
