//! Merging imported records into existing ones, plus format names.

use crate::domain::normalize_email;
use crate::error::ImportError;
use crate::models::{Contact, Tag};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Supported transfer formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFormat {
    Csv,
    Json,
}

impl TransferFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl FromStr for TransferFormat {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for TransferFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Suggested file name for an export: `<prefix>-<YYYY-MM-DD>.<ext>`.
pub fn backup_filename(prefix: &str, format: TransferFormat) -> String {
    let date = chrono::Utc::now().format("%Y-%m-%d");
    format!("{}-{}.{}", prefix, date, format.extension())
}

/// Imported contacts whose email is not already present.
///
/// Emails compare trimmed and case-insensitively. Later duplicates within
/// `imported` are dropped as well.
pub fn merge_contacts(existing: &[Contact], imported: Vec<Contact>) -> Vec<Contact> {
    let mut seen: HashSet<String> = existing.iter().map(|c| normalize_email(&c.email)).collect();
    imported
        .into_iter()
        .filter(|c| seen.insert(normalize_email(&c.email)))
        .collect()
}

/// Imported tags whose name is not already present, compared case-insensitively.
pub fn merge_tags(existing: &[Tag], imported: Vec<Tag>) -> Vec<Tag> {
    let mut seen: HashSet<String> = existing.iter().map(|t| t.name.to_lowercase()).collect();
    let mut ids: HashSet<String> = existing.iter().map(|t| t.id.clone()).collect();
    imported
        .into_iter()
        .filter(|t| seen.insert(t.name.to_lowercase()) && ids.insert(t.id.clone()))
        .collect()
}
