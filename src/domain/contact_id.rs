//! ContactId value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// A contact identifier, numeric or textual.
///
/// Contacts created locally get numeric ids; imported data may carry either
/// kind, so both are preserved exactly as they were stored.
///
/// # Example
///
/// ```
/// use tria_contacts::domain::ContactId;
///
/// let id = ContactId::parse("42").unwrap();
/// assert_eq!(id, ContactId::from(42));
/// assert_eq!(ContactId::parse("c-1").unwrap().to_string(), "c-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ContactId {
    /// Numeric id (integer or float, as stored)
    Number(serde_json::Number),

    /// Free-form string id
    Text(String),
}

impl ContactId {
    /// Parse an id from user input.
    ///
    /// Integer-looking input becomes a numeric id, anything else a text id.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` if the input is blank.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(match raw.parse::<i64>() {
            Ok(n) => Self::Number(n.into()),
            Err(_) => Self::Text(raw.to_string()),
        })
    }

    /// Build a fresh id from the current time, offset by `index` so a batch
    /// generated within the same millisecond stays distinct.
    pub fn generated(index: usize) -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        Self::Number(millis.saturating_add(index as i64).into())
    }

    /// The id as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            Self::Text(_) => None,
        }
    }

    /// Whether the id carries no usable value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    /// Smallest integer id strictly greater than every integer id in `ids`.
    ///
    /// When the largest id is `i64::MAX` there is no such id; the smallest
    /// positive id not yet taken is returned instead.
    pub fn next_after<'a>(ids: impl IntoIterator<Item = &'a ContactId>) -> Self {
        let taken: BTreeSet<i64> = ids.into_iter().filter_map(ContactId::as_i64).collect();
        let max = taken.last().copied().unwrap_or(0).max(0);
        let next = match max.checked_add(1) {
            Some(next) => next,
            None => {
                let mut candidate = 1;
                while taken.contains(&candidate) {
                    candidate += 1;
                }
                candidate
            }
        };
        Self::Number(next.into())
    }
}

impl<'de> Deserialize<'de> for ContactId {
    /// Numbers and strings keep their kind; any other shape reads as an empty
    /// id, which validation rejects and import replaces.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            _ => Self::default(),
        })
    }
}

impl From<i64> for ContactId {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<i32> for ContactId {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n).into())
    }
}

impl From<&str> for ContactId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ContactId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}
