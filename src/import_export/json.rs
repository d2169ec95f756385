//! JSON import and export.

use crate::domain::ContactId;
use crate::error::{ImportError, ImportResult};
use crate::models::{Contact, Tag};
use serde::Serialize;
use serde_json::{Map, Value};

/// Format version written into exports.
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    version: &'static str,
    export_date: String,
    contact_count: usize,
    available_tags: &'a [Tag],
    contacts: &'a [Contact],
}

/// Contacts and tags read from a JSON import.
#[derive(Debug, Default)]
pub struct JsonImport {
    pub contacts: Vec<Contact>,
    pub tags: Vec<Tag>,
}

/// Render contacts and tags as a pretty-printed export document.
pub fn contacts_to_json(contacts: &[Contact], available_tags: &[Tag]) -> ImportResult<String> {
    let document = ExportDocument {
        version: EXPORT_FORMAT_VERSION,
        export_date: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        contact_count: contacts.len(),
        available_tags,
        contacts,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parse a JSON import.
///
/// Accepts either a bare array of contacts or an export document with a
/// `contacts` array (and optionally `availableTags`). Entries that are not
/// objects, or that lack a name or email after trimming, are dropped.
///
/// # Errors
///
/// Returns `ImportError::Json` if the text does not parse and
/// `ImportError::InvalidFormat` if it has neither shape.
pub fn json_to_contacts(text: &str) -> ImportResult<JsonImport> {
    let data: Value = serde_json::from_str(text)?;

    let (raw_contacts, raw_tags) = match data {
        Value::Array(items) => (items, Vec::new()),
        Value::Object(mut object) => match object.remove("contacts") {
            Some(Value::Array(items)) => {
                let tags = match object.remove("availableTags") {
                    Some(Value::Array(tags)) => tags,
                    _ => Vec::new(),
                };
                (items, tags)
            }
            _ => return Err(ImportError::InvalidFormat),
        },
        _ => return Err(ImportError::InvalidFormat),
    };

    let contacts = raw_contacts
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(object) => clean_contact(object, index),
            _ => None,
        })
        .collect();

    let tags = raw_tags
        .into_iter()
        .filter_map(|tag| serde_json::from_value::<Tag>(tag).ok())
        .collect();

    Ok(JsonImport { contacts, tags })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn clean_contact(mut object: Map<String, Value>, index: usize) -> Option<Contact> {
    if object.get("id").map_or(true, is_falsy) {
        object.remove("id");
    }

    let mut contact: Contact = match serde_json::from_value(Value::Object(object)) {
        Ok(contact) => contact,
        Err(e) => {
            tracing::warn!(index, error = %e, "Skipping malformed imported contact");
            return None;
        }
    };

    if contact.id.is_empty() {
        contact.id = ContactId::generated(index);
    }
    contact.name = contact.name.trim().to_string();
    contact.email = contact.email.trim().to_string();
    contact.phone = contact.phone.trim().to_string();

    if contact.name.is_empty() || contact.email.is_empty() {
        return None;
    }
    Some(contact)
}
