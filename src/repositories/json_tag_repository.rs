use super::json_store::{JsonFileStore, TAGS_KEY};
use super::traits::TagRepository;
use crate::domain::ValidationError;
use crate::error::{StoreError, StoreResult};
use crate::import_export::merge_tags;
use crate::models::Tag;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Prepare a tag for insertion next to `existing`.
///
/// Trims the name, generates a timestamp id when none is given and rejects
/// name or id clashes.
pub fn prepare_new_tag(existing: &[Tag], mut tag: Tag) -> StoreResult<Tag> {
    tag.name = tag.name.trim().to_string();
    if tag.name.is_empty() {
        return Err(ValidationError::MissingField("tag name").into());
    }
    if tag.id.trim().is_empty() {
        tag.id = chrono::Utc::now().timestamp_millis().to_string();
    }

    let name_key = tag.name.to_lowercase();
    if existing.iter().any(|t| t.name.to_lowercase() == name_key) {
        return Err(StoreError::Duplicate(format!("tag named {}", tag.name)));
    }
    if existing.iter().any(|t| t.id == tag.id) {
        return Err(StoreError::Duplicate(format!("tag {}", tag.id)));
    }
    Ok(tag)
}

/// Tag repository persisted in a [`JsonFileStore`].
pub struct JsonTagRepository {
    store: Arc<JsonFileStore>,
    write_lock: Mutex<()>,
}

impl JsonTagRepository {
    /// Create a new JsonTagRepository.
    pub fn new(store: Arc<JsonFileStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> StoreResult<Vec<Tag>> {
        Ok(self
            .store
            .get(TAGS_KEY)
            .await?
            .unwrap_or_else(Tag::defaults))
    }

    async fn save(&self, tags: &[Tag]) -> StoreResult<()> {
        self.store.set(TAGS_KEY, tags).await
    }
}

#[async_trait]
impl TagRepository for JsonTagRepository {
    async fn list(&self) -> StoreResult<Vec<Tag>> {
        self.load().await
    }

    async fn create(&self, tag: Tag) -> StoreResult<Tag> {
        let _guard = self.write_lock.lock().await;
        let mut tags = self.load().await?;

        let tag = prepare_new_tag(&tags, tag)?;
        tags.push(tag.clone());
        self.save(&tags).await?;

        tracing::info!(id = %tag.id, name = %tag.name, "Tag created");
        Ok(tag)
    }

    async fn recolor(&self, id: &str, color: &str) -> StoreResult<Tag> {
        let _guard = self.write_lock.lock().await;
        let mut tags = self.load().await?;

        let tag = tags
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("tag {}", id)))?;
        tag.color = color.to_string();
        let tag = tag.clone();
        self.save(&tags).await?;

        Ok(tag)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut tags = self.load().await?;

        let before = tags.len();
        tags.retain(|t| t.id != id);
        if tags.len() == before {
            return Err(StoreError::NotFound(format!("tag {}", id)));
        }
        self.save(&tags).await?;

        tracing::info!(id = %id, "Tag deleted");
        Ok(())
    }

    async fn import_new(&self, imported: Vec<Tag>) -> StoreResult<Vec<Tag>> {
        let _guard = self.write_lock.lock().await;
        let mut tags = self.load().await?;

        let added = merge_tags(&tags, imported);
        if added.is_empty() {
            return Ok(added);
        }
        tags.extend(added.iter().cloned());
        self.save(&tags).await?;

        tracing::info!(count = added.len(), "Tags imported");
        Ok(added)
    }

    async fn replace_all(&self, tags: Vec<Tag>) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        self.save(&tags).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn repo(dir: &TempDir) -> JsonTagRepository {
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        JsonTagRepository::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_fresh_store_lists_defaults() {
        let dir = TempDir::new().unwrap();
        let tags = repo(&dir).await.list().await.unwrap();
        assert_eq!(tags, Tag::defaults());
    }

    #[tokio::test]
    async fn test_create_generates_id_and_trims_name() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        let tag = repo.create(Tag::new("", "  Gym  ", "#000000")).await.unwrap();
        assert_eq!(tag.name, "Gym");
        assert!(!tag.id.is_empty());
        assert_eq!(repo.list().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        let result = repo.create(Tag::new("", "WORK", "#000000")).await;
        assert!(matches!(result, Err(StoreError::Duplicate(_))));

        let result = repo.create(Tag::new("", "   ", "#000000")).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_recolor_and_delete() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir).await;

        let tag = repo.recolor("family", "#111111").await.unwrap();
        assert_eq!(tag.color, "#111111");

        repo.delete("work").await.unwrap();
        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|t| t.id).collect();
        assert!(!ids.contains(&"work".to_string()));
        assert!(matches!(repo.delete("work").await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_import_new_does_not_lose_concurrent_create() {
        let dir = TempDir::new().unwrap();
        let repo = Arc::new(repo(&dir).await);

        let importer = {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.import_new(vec![
                    Tag::new("gym", "Gym", "#111111"),
                    Tag::new("x", "work", "#000000"),
                ])
                .await
            })
        };
        let creator = {
            let repo = repo.clone();
            tokio::spawn(async move { repo.create(Tag::new("club", "Club", "#222222")).await })
        };

        let added = importer.await.unwrap().unwrap();
        creator.await.unwrap().unwrap();

        assert_eq!(added, vec![Tag::new("gym", "Gym", "#111111")]);
        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 7);
        assert!(ids.contains(&"gym".to_string()));
        assert!(ids.contains(&"club".to_string()));
    }
}
