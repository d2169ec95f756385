//! EmailAddress value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email regex")
});

/// A type-safe wrapper for email addresses.
///
/// Email is the duplicate-detection key when contacts are imported, so the
/// wrapper also owns the normalization used for that comparison.
///
/// # Example
///
/// ```
/// use tria_contacts::domain::EmailAddress;
///
/// let email = EmailAddress::new("Alice@Example.com").unwrap();
/// assert_eq!(email.dedup_key(), "alice@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress, validating the format.
    ///
    /// # Validation Rules
    ///
    /// - Must contain exactly one '@' symbol and no whitespace
    /// - Must have a non-empty local part and a dotted domain
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmail` if the email format is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into().trim().to_string();

        if !Self::is_valid(&email) {
            return Err(ValidationError::InvalidEmail(email));
        }

        Ok(Self(email))
    }

    fn is_valid(email: &str) -> bool {
        EMAIL_PATTERN.is_match(email)
    }

    /// Normalized form used to detect duplicates (case-insensitive).
    pub fn dedup_key(&self) -> String {
        normalize_email(&self.0)
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Normalize any email-ish string for duplicate comparison.
///
/// Works on raw strings too, since stored contacts are not guaranteed to hold
/// well-formed addresses.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// Serde support - serialize as string
impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EmailAddress::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        let email = EmailAddress::new("  user@example.com ").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn test_email_validates_format() {
        assert!(EmailAddress::new("invalid").is_err());
        assert!(EmailAddress::new("@example.com").is_err());
        assert!(EmailAddress::new("user@").is_err());
        assert!(EmailAddress::new("user@@example.com").is_err());
        assert!(EmailAddress::new("alice.j@x.com").is_ok());
        assert!(EmailAddress::new("user@localhost").is_err());
        assert!(EmailAddress::new("us er@x.com").is_err());
    }

    #[test]
    fn test_dedup_key_is_case_insensitive() {
        let a = EmailAddress::new("Bob@X.com").unwrap();
        let b = EmailAddress::new("bob@x.COM").unwrap();
        assert_eq!(a.dedup_key(), b.dedup_key());
        assert_eq!(normalize_email("  Bob@X.com "), "bob@x.com");
    }

    #[test]
    fn test_email_deserialization_invalid_fails() {
        let result: Result<EmailAddress, _> = serde_json::from_str("\"invalid\"");
        assert!(result.is_err());
    }
}
