use crate::domain::ContactId;
use crate::error::StoreResult;
use crate::models::{Contact, Tag};
use async_trait::async_trait;

/// Repository for managing contacts.
///
/// Provides abstraction over contact storage and retrieval,
/// enabling different implementations (file-backed, in-memory mock).
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Retrieve every stored contact, in insertion order.
    async fn list(&self) -> StoreResult<Vec<Contact>>;

    /// Retrieve a single contact by ID.
    async fn get(&self, id: &ContactId) -> StoreResult<Contact>;

    /// Add a new contact.
    ///
    /// The returned contact carries the id actually assigned, which differs
    /// from the given one when that id is already taken.
    async fn create(&self, contact: Contact) -> StoreResult<Contact>;

    /// Add the contacts whose email is not stored yet, in one write.
    ///
    /// Emails compare trimmed and case-insensitively, within the batch as
    /// well. Returns the contacts actually added; empty when every email was
    /// already known.
    async fn import_new(&self, contacts: Vec<Contact>) -> StoreResult<Vec<Contact>>;

    /// Replace the fields of an existing contact, keeping its id.
    async fn update(&self, id: &ContactId, contact: Contact) -> StoreResult<Contact>;

    /// Delete a contact.
    async fn delete(&self, id: &ContactId) -> StoreResult<()>;

    /// Overwrite the whole contact list.
    async fn replace_all(&self, contacts: Vec<Contact>) -> StoreResult<()>;
}

/// Repository for managing tags.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Retrieve every tag; a fresh store yields the default tags.
    async fn list(&self) -> StoreResult<Vec<Tag>>;

    /// Add a new tag. Names are unique case-insensitively.
    async fn create(&self, tag: Tag) -> StoreResult<Tag>;

    /// Change the display color of a tag.
    async fn recolor(&self, id: &str, color: &str) -> StoreResult<Tag>;

    /// Delete a tag. Contacts referencing it are left untouched.
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Add the tags whose name and id are not stored yet, in one write.
    async fn import_new(&self, tags: Vec<Tag>) -> StoreResult<Vec<Tag>>;

    /// Overwrite the whole tag list.
    async fn replace_all(&self, tags: Vec<Tag>) -> StoreResult<()>;
}
