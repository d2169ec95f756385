use super::json_store::{JsonFileStore, CONTACTS_KEY};
use super::traits::ContactRepository;
use crate::domain::{validate_contact, validate_contacts, ContactId};
use crate::error::{StoreError, StoreResult};
use crate::import_export::merge_contacts;
use crate::models::Contact;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Prepare a contact for insertion next to `existing`.
///
/// Validates the record, stamps `created_at` when missing and swaps in a
/// fresh numeric id when the given one is empty or already taken.
pub fn prepare_new_contact(existing: &[Contact], mut contact: Contact) -> StoreResult<Contact> {
    if contact.id.is_empty() || existing.iter().any(|c| c.id == contact.id) {
        contact.id = ContactId::next_after(existing.iter().map(|c| &c.id));
    }
    validate_contact(&contact)?;

    if contact.created_at.is_none() {
        contact.created_at = Some(chrono::Utc::now().to_rfc3339());
    }
    Ok(contact)
}

/// Contact repository persisted in a [`JsonFileStore`].
///
/// The whole list lives under one key; every mutation is a
/// read-modify-write held under a lock so concurrent tool calls cannot lose
/// each other's writes.
pub struct JsonContactRepository {
    store: Arc<JsonFileStore>,
    write_lock: Mutex<()>,
}

impl JsonContactRepository {
    /// Create a new JsonContactRepository.
    pub fn new(store: Arc<JsonFileStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> StoreResult<Vec<Contact>> {
        let stored: Vec<Contact> = self.store.get(CONTACTS_KEY).await?.unwrap_or_default();
        Ok(validate_contacts(stored))
    }

    async fn save(&self, contacts: &[Contact]) -> StoreResult<()> {
        self.store.set(CONTACTS_KEY, contacts).await
    }
}

#[async_trait]
impl ContactRepository for JsonContactRepository {
    async fn list(&self) -> StoreResult<Vec<Contact>> {
        self.load().await
    }

    async fn get(&self, id: &ContactId) -> StoreResult<Contact> {
        self.load()
            .await?
            .into_iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("contact {}", id)))
    }

    async fn create(&self, contact: Contact) -> StoreResult<Contact> {
        let _guard = self.write_lock.lock().await;
        let mut contacts = self.load().await?;

        let contact = prepare_new_contact(&contacts, contact)?;
        contacts.push(contact.clone());
        self.save(&contacts).await?;

        tracing::info!(id = %contact.id, "Contact created");
        Ok(contact)
    }

    async fn import_new(&self, imported: Vec<Contact>) -> StoreResult<Vec<Contact>> {
        let _guard = self.write_lock.lock().await;
        let mut contacts = self.load().await?;

        let mut created = Vec::new();
        for contact in merge_contacts(&contacts, imported) {
            let contact = prepare_new_contact(&contacts, contact)?;
            contacts.push(contact.clone());
            created.push(contact);
        }
        if created.is_empty() {
            return Ok(created);
        }
        self.save(&contacts).await?;

        tracing::info!(count = created.len(), "Contacts imported");
        Ok(created)
    }

    async fn update(&self, id: &ContactId, mut contact: Contact) -> StoreResult<Contact> {
        let _guard = self.write_lock.lock().await;
        let mut contacts = self.load().await?;

        let slot = contacts
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("contact {}", id)))?;

        contact.id = id.clone();
        if contact.created_at.is_none() {
            contact.created_at = slot.created_at.clone();
        }
        validate_contact(&contact)?;
        *slot = contact.clone();
        self.save(&contacts).await?;

        tracing::info!(id = %id, "Contact updated");
        Ok(contact)
    }

    async fn delete(&self, id: &ContactId) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut contacts = self.load().await?;

        let before = contacts.len();
        contacts.retain(|c| &c.id != id);
        if contacts.len() == before {
            return Err(StoreError::NotFound(format!("contact {}", id)));
        }
        self.save(&contacts).await?;

        tracing::info!(id = %id, "Contact deleted");
        Ok(())
    }

    async fn replace_all(&self, contacts: Vec<Contact>) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        self.save(&contacts).await?;
        tracing::info!(count = contacts.len(), "Contact list replaced");
        Ok(())
    }
}
