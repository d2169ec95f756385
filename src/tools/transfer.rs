//! Import and export tools.
//!
//! Imports parse the text, drop records that already exist and persist the
//! rest; exports render the whole address book.

use crate::error::{ImportError, ImportResult};
use crate::import_export::{
    backup_filename, contacts_to_csv, contacts_to_json, csv_to_contacts, json_to_contacts,
    JsonImport, TransferFormat,
};
use crate::models::Contact;
use crate::observability::MetricsTracker;
use crate::repositories::{ContactRepository, TagRepository};
use serde::Serialize;
use std::sync::Arc;

/// File name prefix used for exports.
pub const EXPORT_PREFIX: &str = "tria-contacts";

/// What an import added.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Contacts read from the input after dropping invalid rows
    pub parsed: usize,

    /// Contacts added (after dropping known emails)
    pub imported: Vec<Contact>,

    /// Number of tags added
    pub imported_tags: usize,
}

/// A rendered export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    /// Suggested file name, e.g. `tria-contacts-2024-05-01.csv`
    pub filename: String,
    pub contact_count: usize,
    pub content: String,
}

/// Import/export tools backed by the contact and tag repositories.
#[derive(Clone)]
pub struct TransferTools {
    contact_repo: Arc<dyn ContactRepository>,
    tag_repo: Arc<dyn TagRepository>,
    metrics: MetricsTracker,
}

impl TransferTools {
    /// Create new import/export tools.
    pub fn new(
        contact_repo: Arc<dyn ContactRepository>,
        tag_repo: Arc<dyn TagRepository>,
        metrics: MetricsTracker,
    ) -> Self {
        Self {
            contact_repo,
            tag_repo,
            metrics,
        }
    }

    /// Import contacts (and, for JSON exports, tags) from `content`.
    ///
    /// New tags are stored before contacts, so a JSON file whose contacts all
    /// exist still contributes its unseen tags. Duplicate checks run inside
    /// the repositories' writes, so concurrent imports never store an email
    /// twice.
    ///
    /// # Errors
    ///
    /// Parse errors from the format, `ImportError::NothingToImport` if every
    /// contact's email is already present, or a store error.
    pub async fn import_contacts(
        &self,
        format: TransferFormat,
        content: &str,
    ) -> ImportResult<ImportSummary> {
        let JsonImport { contacts, tags } = match format {
            TransferFormat::Csv => JsonImport {
                contacts: csv_to_contacts(content)?,
                tags: Vec::new(),
            },
            TransferFormat::Json => json_to_contacts(content)?,
        };
        let parsed = contacts.len();

        let mut imported_tags = 0;
        if !tags.is_empty() {
            imported_tags = self.tag_repo.import_new(tags).await?.len();
        }

        let imported = self.contact_repo.import_new(contacts).await?;
        if imported.is_empty() {
            return Err(ImportError::NothingToImport);
        }
        self.metrics.track_import(&format.to_string(), imported.len());

        Ok(ImportSummary {
            parsed,
            imported,
            imported_tags,
        })
    }

    /// Render every contact (and, for JSON, every tag) in `format`.
    pub async fn export_contacts(&self, format: TransferFormat) -> ImportResult<ExportResponse> {
        let contacts = self.contact_repo.list().await?;

        let content = match format {
            TransferFormat::Csv => contacts_to_csv(&contacts),
            TransferFormat::Json => {
                let tags = self.tag_repo.list().await?;
                contacts_to_json(&contacts, &tags)?
            }
        };

        tracing::debug!(format = %format, count = contacts.len(), "Exported contacts");
        Ok(ExportResponse {
            filename: backup_filename(EXPORT_PREFIX, format),
            contact_count: contacts.len(),
            content,
        })
    }
}
