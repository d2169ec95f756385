use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tria_contacts::domain::ContactId;
use tria_contacts::error::{StoreError, StoreResult};
use tria_contacts::import_export::merge_contacts;
use tria_contacts::models::Contact;
use tria_contacts::repositories::{prepare_new_contact, ContactRepository};

/// Mock contact repository for testing.
///
/// Provides an in-memory implementation of ContactRepository that can be
/// easily configured with test data and tracks method calls for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<Vec<Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create a repository seeded with `contacts`, stored as given.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let repo = Self::new();
        repo.add_contacts(contacts);
        repo
    }

    /// Add a contact to the mock repository without validation.
    pub fn add_contact(&self, contact: Contact) {
        self.contacts.lock().unwrap().push(contact);
    }

    /// Add multiple contacts to the mock repository.
    pub fn add_contacts(&self, contacts_list: Vec<Contact>) {
        self.contacts.lock().unwrap().extend(contacts_list);
    }

    /// Snapshot of the stored contacts.
    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn list(&self) -> StoreResult<Vec<Contact>> {
        self.track_call("list");
        Ok(self.contacts())
    }

    async fn get(&self, id: &ContactId) -> StoreResult<Contact> {
        self.track_call("get");

        let contacts = self.contacts.lock().unwrap();
        contacts
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("contact {}", id)))
    }

    async fn create(&self, contact: Contact) -> StoreResult<Contact> {
        self.track_call("create");

        let mut contacts = self.contacts.lock().unwrap();
        let contact = prepare_new_contact(&contacts, contact)?;
        contacts.push(contact.clone());
        Ok(contact)
    }

    async fn import_new(&self, imported: Vec<Contact>) -> StoreResult<Vec<Contact>> {
        self.track_call("import_new");

        let mut contacts = self.contacts.lock().unwrap();
        let mut created = Vec::new();
        for contact in merge_contacts(&contacts, imported) {
            let contact = prepare_new_contact(&contacts, contact)?;
            contacts.push(contact.clone());
            created.push(contact);
        }
        Ok(created)
    }

    async fn update(&self, id: &ContactId, mut contact: Contact) -> StoreResult<Contact> {
        self.track_call("update");

        let mut contacts = self.contacts.lock().unwrap();
        let slot = contacts
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("contact {}", id)))?;
        contact.id = id.clone();
        *slot = contact.clone();
        Ok(contact)
    }

    async fn delete(&self, id: &ContactId) -> StoreResult<()> {
        self.track_call("delete");

        let mut contacts = self.contacts.lock().unwrap();
        let before = contacts.len();
        contacts.retain(|c| &c.id != id);
        if contacts.len() == before {
            return Err(StoreError::NotFound(format!("contact {}", id)));
        }
        Ok(())
    }

    async fn replace_all(&self, contacts: Vec<Contact>) -> StoreResult<()> {
        self.track_call("replace_all");
        *self.contacts.lock().unwrap() = contacts;
        Ok(())
    }
}
