//! Contact management tools.
//!
//! Listing with category filters and sort orders, lookups, and the
//! add/update/delete operations behind the contact form.

use crate::domain::{validate_new_contact, ContactId, ValidationError};
use crate::error::StoreResult;
use crate::models::Contact;
use crate::observability::MetricsTracker;
use crate::repositories::ContactRepository;
use chrono::DateTime;
use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::Arc;

/// Sidebar category a listing can be narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactCategory {
    #[default]
    All,
    Favorites,
    Businesses,
}

impl ContactCategory {
    /// Whether `contact` belongs to this category.
    pub fn includes(self, contact: &Contact) -> bool {
        match self {
            Self::All => true,
            Self::Favorites => contact.is_favorite,
            Self::Businesses => contact.is_business_contact,
        }
    }
}

impl FromStr for ContactCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(Self::All),
            "favorites" => Ok(Self::Favorites),
            "businesses" => Ok(Self::Businesses),
            other => Err(ValidationError::UnknownOption {
                kind: "category",
                value: other.to_string(),
            }),
        }
    }
}

/// Listing order.
///
/// `Name` is alphabetical, `Recent` newest first and `Frequency` most
/// contacted first; the `Desc` variants reverse each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Name,
    NameDesc,
    Recent,
    RecentDesc,
    Frequency,
    FrequencyDesc,
}

impl SortOrder {
    /// Every order, in the sequence a toolbar toggle steps through them.
    pub const CYCLE: [SortOrder; 6] = [
        Self::Name,
        Self::NameDesc,
        Self::Recent,
        Self::RecentDesc,
        Self::Frequency,
        Self::FrequencyDesc,
    ];

    /// The order following this one in [`SortOrder::CYCLE`].
    pub fn next(self) -> Self {
        let index = Self::CYCLE.iter().position(|o| *o == self).unwrap_or(0);
        Self::CYCLE[(index + 1) % Self::CYCLE.len()]
    }

    fn compare(self, a: &Contact, b: &Contact) -> Ordering {
        match self {
            Self::Name => name_key(a).cmp(&name_key(b)),
            Self::NameDesc => name_key(b).cmp(&name_key(a)),
            Self::Recent => created_millis(b).cmp(&created_millis(a)),
            Self::RecentDesc => created_millis(a).cmp(&created_millis(b)),
            Self::Frequency => interactions(b).cmp(&interactions(a)),
            Self::FrequencyDesc => interactions(a).cmp(&interactions(b)),
        }
    }

    /// Sort `contacts` in place. Ties keep their relative order.
    pub fn sort(self, contacts: &mut [Contact]) {
        contacts.sort_by(|a, b| self.compare(a, b));
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "name" => Ok(Self::Name),
            "name-desc" => Ok(Self::NameDesc),
            "recent" => Ok(Self::Recent),
            "recent-desc" => Ok(Self::RecentDesc),
            "frequency" => Ok(Self::Frequency),
            "frequency-desc" => Ok(Self::FrequencyDesc),
            other => Err(ValidationError::UnknownOption {
                kind: "sort order",
                value: other.to_string(),
            }),
        }
    }
}

fn name_key(contact: &Contact) -> String {
    contact.name.to_lowercase()
}

fn created_millis(contact: &Contact) -> i64 {
    contact
        .created_at
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map_or(0, |at| at.timestamp_millis())
}

fn interactions(contact: &Contact) -> u64 {
    contact.interaction_count.unwrap_or(0)
}

/// Parameters for listing contacts.
#[derive(Debug, Clone, Default)]
pub struct ListContactsParams {
    pub category: ContactCategory,
    pub sort: SortOrder,

    /// Tag ids; when non-empty only contacts carrying at least one are listed
    pub tags: Vec<String>,
}

/// Field changes for an existing contact. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct UpdateContactParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub tags: Option<Vec<String>>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub address: Option<String>,
    pub birthday: Option<String>,
    pub is_favorite: Option<bool>,
    pub is_business_contact: Option<bool>,
}

impl UpdateContactParams {
    fn apply(self, contact: &mut Contact) {
        if let Some(name) = self.name {
            contact.name = name.trim().to_string();
        }
        if let Some(email) = self.email {
            contact.email = email.trim().to_string();
        }
        if let Some(phone) = self.phone {
            contact.phone = phone.trim().to_string();
        }
        if let Some(tags) = self.tags {
            contact.tags = tags;
        }
        if let Some(company) = self.company {
            contact.company = Some(company);
        }
        if let Some(job_title) = self.job_title {
            contact.job_title = Some(job_title);
        }
        if let Some(address) = self.address {
            contact.address = Some(address);
        }
        if let Some(birthday) = self.birthday {
            contact.birthday = Some(birthday);
        }
        if let Some(is_favorite) = self.is_favorite {
            contact.is_favorite = is_favorite;
        }
        if let Some(is_business_contact) = self.is_business_contact {
            contact.is_business_contact = is_business_contact;
        }
    }
}

/// Contact management tools backed by a contact repository.
#[derive(Clone)]
pub struct ContactTools {
    contact_repo: Arc<dyn ContactRepository>,
    metrics: MetricsTracker,
}

impl ContactTools {
    /// Create new contact tools.
    pub fn new(contact_repo: Arc<dyn ContactRepository>, metrics: MetricsTracker) -> Self {
        Self {
            contact_repo,
            metrics,
        }
    }

    /// List contacts in a category, filtered by tag and sorted.
    pub async fn list_contacts(&self, params: ListContactsParams) -> StoreResult<Vec<Contact>> {
        let mut contacts: Vec<Contact> = self
            .contact_repo
            .list()
            .await?
            .into_iter()
            .filter(|c| params.category.includes(c))
            .filter(|c| params.tags.is_empty() || c.has_any_tag(&params.tags))
            .collect();

        params.sort.sort(&mut contacts);
        Ok(contacts)
    }

    /// Get a single contact.
    pub async fn get_contact(&self, id: &ContactId) -> StoreResult<Contact> {
        self.contact_repo.get(id).await
    }

    /// Add a contact entered by hand.
    ///
    /// The form rules apply (name length, email and phone shape); the
    /// repository assigns the id.
    pub async fn add_contact(&self, mut contact: Contact) -> StoreResult<Contact> {
        contact.name = contact.name.trim().to_string();
        contact.email = contact.email.trim().to_string();
        contact.phone = contact.phone.trim().to_string();
        validate_new_contact(&contact)?;

        let result = self.contact_repo.create(contact).await;
        self.metrics.track_store_write("add_contact", result.is_ok());
        result
    }

    /// Apply field changes to an existing contact.
    ///
    /// The form rules are checked only when name, email or phone change, so
    /// imported records without a phone can still be starred or retagged.
    pub async fn update_contact(
        &self,
        id: &ContactId,
        params: UpdateContactParams,
    ) -> StoreResult<Contact> {
        let mut contact = self.contact_repo.get(id).await?;
        let form_fields_changed =
            params.name.is_some() || params.email.is_some() || params.phone.is_some();
        params.apply(&mut contact);
        if form_fields_changed {
            validate_new_contact(&contact)?;
        }

        let result = self.contact_repo.update(id, contact).await;
        self.metrics
            .track_store_write("update_contact", result.is_ok());
        result
    }

    /// Delete a contact.
    pub async fn delete_contact(&self, id: &ContactId) -> StoreResult<()> {
        let result = self.contact_repo.delete(id).await;
        self.metrics
            .track_store_write("delete_contact", result.is_ok());
        result
    }
}
