//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    EmptyId,

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided phone number is invalid.
    InvalidPhone(String),

    /// The provided name is too short.
    InvalidName(String),

    /// A required contact field is blank.
    MissingField(&'static str),

    /// A named option (sort order, category) is not recognised.
    UnknownOption { kind: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ID cannot be empty"),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidPhone(phone) => write!(f, "Invalid phone number: {}", phone),
            Self::InvalidName(name) => write!(f, "Name must be at least 2 characters: {}", name),
            Self::MissingField(field) => write!(f, "{} cannot be empty", field),
            Self::UnknownOption { kind, value } => write!(f, "Unknown {}: {}", kind, value),
        }
    }
}

impl std::error::Error for ValidationError {}
