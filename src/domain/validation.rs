//! Record-level contact validation.
//!
//! Two levels exist. [`validate_contact`] is the lenient check applied to
//! stored and imported records. [`validate_new_contact`] is the stricter check
//! applied to contacts entered by hand.

use super::{EmailAddress, ValidationError};
use crate::models::Contact;
use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+]?[\d\-()]{10,}$").expect("Failed to compile phone regex"));

/// Check that a stored record is usable: an id, a name and an email.
///
/// Phone is not required here because CSV imports may legitimately omit it.
pub fn validate_contact(contact: &Contact) -> Result<(), ValidationError> {
    if contact.id.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    if contact.name.trim().is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    if contact.email.trim().is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    Ok(())
}

/// Keep only the contacts that pass [`validate_contact`].
pub fn validate_contacts(contacts: Vec<Contact>) -> Vec<Contact> {
    contacts
        .into_iter()
        .filter(|contact| match validate_contact(contact) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(id = %contact.id, error = %e, "Dropping invalid contact");
                false
            }
        })
        .collect()
}

/// Validate a contact entered by hand.
///
/// Name must have at least two characters, email must look like an address
/// and phone must hold ten or more digits/formatting characters.
pub fn validate_new_contact(contact: &Contact) -> Result<(), ValidationError> {
    let name = contact.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    if name.chars().count() < 2 {
        return Err(ValidationError::InvalidName(name.to_string()));
    }

    if contact.email.trim().is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    EmailAddress::new(contact.email.as_str())?;

    if contact.phone.trim().is_empty() {
        return Err(ValidationError::MissingField("phone"));
    }
    let compact: String = contact.phone.chars().filter(|c| !c.is_whitespace()).collect();
    if !PHONE_PATTERN.is_match(&compact) {
        return Err(ValidationError::InvalidPhone(contact.phone.clone()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContactId;

    #[test]
    fn test_validate_contact_requires_id_name_email() {
        assert!(validate_contact(&Contact::new(1, "A", "a@x.com", "")).is_ok());
        assert_eq!(
            validate_contact(&Contact::new(ContactId::default(), "A", "a@x.com", "1")),
            Err(ValidationError::EmptyId)
        );
        assert_eq!(
            validate_contact(&Contact::new(1, "  ", "a@x.com", "1")),
            Err(ValidationError::MissingField("name"))
        );
        assert_eq!(
            validate_contact(&Contact::new(1, "A", "", "1")),
            Err(ValidationError::MissingField("email"))
        );
    }

    #[test]
    fn test_validate_contacts_filters() {
        let contacts = vec![
            Contact::new(1, "A", "a@x.com", "1"),
            Contact::new(2, "", "b@x.com", "2"),
            Contact::new(3, "C", "c@x.com", "3"),
        ];
        let valid = validate_contacts(contacts);
        assert_eq!(valid.len(), 2);
        assert_eq!(valid[1].id, ContactId::from(3));
    }

    #[test]
    fn test_validate_new_contact() {
        let ok = Contact::new(1, "Alice Johnson", "alice@example.com", "+1 (555) 123-4567");
        assert!(validate_new_contact(&ok).is_ok());

        let short_name = Contact::new(1, "A", "alice@example.com", "5551234567");
        assert!(matches!(
            validate_new_contact(&short_name),
            Err(ValidationError::InvalidName(_))
        ));

        let bad_email = Contact::new(1, "Alice", "alice@example", "5551234567");
        assert!(matches!(
            validate_new_contact(&bad_email),
            Err(ValidationError::InvalidEmail(_))
        ));

        let short_phone = Contact::new(1, "Alice", "alice@example.com", "555-1234");
        assert!(matches!(
            validate_new_contact(&short_phone),
            Err(ValidationError::InvalidPhone(_))
        ));

        let missing_phone = Contact::new(1, "Alice", "alice@example.com", " ");
        assert_eq!(
            validate_new_contact(&missing_phone),
            Err(ValidationError::MissingField("phone"))
        );
    }
}
