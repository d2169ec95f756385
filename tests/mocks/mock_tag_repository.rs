use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tria_contacts::error::{StoreError, StoreResult};
use tria_contacts::import_export::merge_tags;
use tria_contacts::models::Tag;
use tria_contacts::repositories::{prepare_new_tag, TagRepository};

/// Mock tag repository for testing, seeded with the default tags.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockTagRepository {
    tags: Arc<Mutex<Vec<Tag>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockTagRepository {
    /// Create a repository holding the default tags.
    pub fn new() -> Self {
        Self::with_tags(Tag::defaults())
    }

    /// Create a repository holding exactly `tags`.
    pub fn with_tags(tags: Vec<Tag>) -> Self {
        Self {
            tags: Arc::new(Mutex::new(tags)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Snapshot of the stored tags.
    pub fn tags(&self) -> Vec<Tag> {
        self.tags.lock().unwrap().clone()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockTagRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagRepository for MockTagRepository {
    async fn list(&self) -> StoreResult<Vec<Tag>> {
        self.track_call("list");
        Ok(self.tags())
    }

    async fn create(&self, tag: Tag) -> StoreResult<Tag> {
        self.track_call("create");

        let mut tags = self.tags.lock().unwrap();
        let tag = prepare_new_tag(&tags, tag)?;
        tags.push(tag.clone());
        Ok(tag)
    }

    async fn recolor(&self, id: &str, color: &str) -> StoreResult<Tag> {
        self.track_call("recolor");

        let mut tags = self.tags.lock().unwrap();
        let tag = tags
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("tag {}", id)))?;
        tag.color = color.to_string();
        Ok(tag.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.track_call("delete");

        let mut tags = self.tags.lock().unwrap();
        let before = tags.len();
        tags.retain(|t| t.id != id);
        if tags.len() == before {
            return Err(StoreError::NotFound(format!("tag {}", id)));
        }
        Ok(())
    }

    async fn import_new(&self, imported: Vec<Tag>) -> StoreResult<Vec<Tag>> {
        self.track_call("import_new");

        let mut tags = self.tags.lock().unwrap();
        let added = merge_tags(&tags, imported);
        tags.extend(added.iter().cloned());
        Ok(added)
    }

    async fn replace_all(&self, tags: Vec<Tag>) -> StoreResult<()> {
        self.track_call("replace_all");
        *self.tags.lock().unwrap() = tags;
        Ok(())
    }
}
