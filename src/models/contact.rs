//! Contact model representing a person in the address book.

use crate::domain::ContactId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accept any JSON scalar where a string is expected.
///
/// Stored and imported records are loosely shaped: `null` or a missing field
/// becomes an empty string and numbers are stringified.
fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Accept anything where a tag list is expected; non-arrays become empty.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Accept any JSON value where an optional string is expected.
///
/// Numbers and booleans are stringified; `null`, arrays and objects become
/// `None` rather than failing the whole record.
fn deserialize_lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Accept a non-negative integer, or a string holding one; anything else is `None`.
fn deserialize_lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accept `true`/`"true"` as set; every other value reads as unset.
fn deserialize_lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

fn is_false(b: &bool) -> bool {
    !b
}

/// A contact in the address book.
///
/// Field names follow the persisted camelCase shape. Only `name`, `email`
/// and `phone` are looked at by search; the remaining fields are carried
/// through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    /// Unique identifier for the contact
    pub id: ContactId,

    /// Display name
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub name: String,

    /// Email address, also the duplicate key on import
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub email: String,

    /// Phone number, free-form formatting
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub phone: String,

    /// Ids of the tags attached to this contact
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,

    /// Profile image (URL or data URI)
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_opt_string"
    )]
    pub image: Option<String>,

    /// Company/organization
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_opt_string"
    )]
    pub company: Option<String>,

    /// Job title
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_opt_string"
    )]
    pub job_title: Option<String>,

    /// Postal address
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_opt_string"
    )]
    pub address: Option<String>,

    /// Birthday
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_opt_string"
    )]
    pub birthday: Option<String>,

    /// When the contact was created (ISO 8601 timestamp)
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_opt_string"
    )]
    pub created_at: Option<String>,

    /// How often the contact has been interacted with
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_count"
    )]
    pub interaction_count: Option<u64>,

    /// Starred by the user
    #[serde(skip_serializing_if = "is_false", deserialize_with = "deserialize_lenient_flag")]
    pub is_favorite: bool,

    /// Belongs to the business category
    #[serde(skip_serializing_if = "is_false", deserialize_with = "deserialize_lenient_flag")]
    pub is_business_contact: bool,
}

impl Contact {
    /// Create a new contact with the core fields.
    pub fn new(
        id: impl Into<ContactId>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    /// Builder-style helper to attach tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the contact carries the given tag id.
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t == tag_id)
    }

    /// Whether the contact carries at least one of the given tag ids.
    pub fn has_any_tag<S: AsRef<str>>(&self, tag_ids: &[S]) -> bool {
        tag_ids.iter().any(|t| self.has_tag(t.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_new() {
        let contact = Contact::new(1, "Alice Johnson", "alice.j@x.com", "555-1234");
        assert_eq!(contact.id, ContactId::from(1));
        assert_eq!(contact.name, "Alice Johnson");
        assert!(contact.tags.is_empty());
        assert!(!contact.is_favorite);
    }

    #[test]
    fn test_contact_deserialization_tolerates_missing_fields() {
        let json = r#"{"id": 3, "name": "Xyzzy"}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.name, "Xyzzy");
        assert_eq!(contact.email, "");
        assert_eq!(contact.phone, "");
        assert!(contact.tags.is_empty());
    }

    #[test]
    fn test_contact_deserialization_tolerates_odd_shapes() {
        let json = r#"{"id": "a", "name": null, "phone": 5551234, "tags": "work"}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.name, "");
        assert_eq!(contact.phone, "5551234");
        assert!(contact.tags.is_empty());
    }

    #[test]
    fn test_contact_camel_case_round_trip() {
        let json = r#"{"id":1,"name":"A","email":"a@x.com","phone":"1","tags":["work"],
            "jobTitle":"CTO","interactionCount":4,"isFavorite":true}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.job_title.as_deref(), Some("CTO"));
        assert_eq!(contact.interaction_count, Some(4));
        assert!(contact.is_favorite);

        let out = serde_json::to_value(&contact).unwrap();
        assert_eq!(out["jobTitle"], "CTO");
        assert_eq!(out["isFavorite"], true);
        assert!(out.get("isBusinessContact").is_none());
        assert!(out.get("company").is_none());
    }

    #[test]
    fn test_contact_deserialization_tolerates_odd_extension_fields() {
        let json = r#"{
            "id": 4, "name": "Cy", "email": "cy@x.com",
            "isFavorite": null, "isBusinessContact": "true",
            "interactionCount": "5", "company": 42,
            "address": {"street": "Main"}, "birthday": null
        }"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert!(!contact.is_favorite);
        assert!(contact.is_business_contact);
        assert_eq!(contact.interaction_count, Some(5));
        assert_eq!(contact.company.as_deref(), Some("42"));
        assert_eq!(contact.address, None);
        assert_eq!(contact.birthday, None);

        let contact: Contact =
            serde_json::from_str(r#"{"id": 5, "interactionCount": -3, "isFavorite": 1}"#).unwrap();
        assert_eq!(contact.interaction_count, None);
        assert!(!contact.is_favorite);
    }

    #[test]
    fn test_has_any_tag() {
        let contact = Contact::new(1, "A", "a@x.com", "1").with_tags(["work", "family"]);
        assert!(contact.has_tag("work"));
        assert!(contact.has_any_tag(&["friends", "family"]));
        assert!(!contact.has_any_tag(&["friends"]));
        assert!(!contact.has_any_tag::<&str>(&[]));
    }
}
