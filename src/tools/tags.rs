//! Tag management tools.

use crate::error::StoreResult;
use crate::models::{Contact, Tag, DEFAULT_TAG_COLOR};
use crate::observability::MetricsTracker;
use crate::repositories::{ContactRepository, TagRepository};
use serde::Serialize;
use std::sync::Arc;

/// A tag together with how many contacts carry it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSummary {
    #[serde(flatten)]
    pub tag: Tag,
    pub contact_count: usize,
}

/// Count, for each tag, the contacts carrying it.
pub fn tag_counts(tags: Vec<Tag>, contacts: &[Contact]) -> Vec<TagSummary> {
    tags.into_iter()
        .map(|tag| {
            let contact_count = contacts.iter().filter(|c| c.has_tag(&tag.id)).count();
            TagSummary { tag, contact_count }
        })
        .collect()
}

/// Tag tools backed by the tag and contact repositories.
#[derive(Clone)]
pub struct TagTools {
    tag_repo: Arc<dyn TagRepository>,
    contact_repo: Arc<dyn ContactRepository>,
    metrics: MetricsTracker,
}

impl TagTools {
    /// Create new tag tools.
    pub fn new(
        tag_repo: Arc<dyn TagRepository>,
        contact_repo: Arc<dyn ContactRepository>,
        metrics: MetricsTracker,
    ) -> Self {
        Self {
            tag_repo,
            contact_repo,
            metrics,
        }
    }

    /// Every tag with its contact count.
    pub async fn list_tags(&self) -> StoreResult<Vec<TagSummary>> {
        let (tags, contacts) =
            futures::try_join!(self.tag_repo.list(), self.contact_repo.list())?;
        Ok(tag_counts(tags, &contacts))
    }

    /// Create a tag named `name`, using the default color when none is given.
    pub async fn add_tag(&self, name: &str, color: Option<String>) -> StoreResult<Tag> {
        let color = color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string());

        let result = self.tag_repo.create(Tag::new("", name, color)).await;
        self.metrics.track_store_write("add_tag", result.is_ok());
        result
    }

    /// Change the color of a tag.
    pub async fn recolor_tag(&self, id: &str, color: &str) -> StoreResult<Tag> {
        let result = self.tag_repo.recolor(id, color).await;
        self.metrics.track_store_write("recolor_tag", result.is_ok());
        result
    }

    /// Delete a tag. Contacts keep the dangling id.
    pub async fn delete_tag(&self, id: &str) -> StoreResult<()> {
        let result = self.tag_repo.delete(id).await;
        self.metrics.track_store_write("delete_tag", result.is_ok());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_counts() {
        let contacts = vec![
            Contact::new(1, "Ann", "ann@x.com", "").with_tags(vec!["work", "family"]),
            Contact::new(2, "Bob", "bob@x.com", "").with_tags(vec!["work"]),
        ];

        let summaries = tag_counts(Tag::defaults(), &contacts);
        let counts: Vec<(&str, usize)> = summaries
            .iter()
            .map(|s| (s.tag.id.as_str(), s.contact_count))
            .collect();
        assert_eq!(
            counts,
            vec![("work", 2), ("family", 1), ("friends", 0), ("business", 0), ("emergency", 0)]
        );
    }

    #[test]
    fn test_tag_summary_serializes_flat() {
        let summary = TagSummary {
            tag: Tag::new("work", "Work", "#007bff"),
            contact_count: 3,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["id"], "work");
        assert_eq!(value["contactCount"], 3);
    }
}
