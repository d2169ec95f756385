//! Tag model used to organize contacts.

use serde::{Deserialize, Serialize};

/// Color given to tags created without one.
pub const DEFAULT_TAG_COLOR: &str = "#007bff";

/// A label that contacts reference by `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Unique identifier, referenced from `Contact::tags`
    pub id: String,

    /// Display name
    pub name: String,

    /// Display color hint (CSS color)
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_TAG_COLOR.to_string()
}

impl Tag {
    /// Create a new tag.
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// The tag set a fresh address book starts with.
    pub fn defaults() -> Vec<Tag> {
        vec![
            Tag::new("work", "Work", "#007bff"),
            Tag::new("family", "Family", "#28a745"),
            Tag::new("friends", "Friends", "#ffc107"),
            Tag::new("business", "Business", "#6f42c1"),
            Tag::new("emergency", "Emergency", "#dc3545"),
        ]
    }
}
