//! Durable key-value storage backed by JSON files.
//!
//! Each key maps to `<root>/<key>.json`. Values are written to a sibling
//! temporary file and renamed into place so a crash never leaves a
//! half-written value behind.

use crate::error::StoreResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Key holding the contact list.
pub const CONTACTS_KEY: &str = "tria-contacts";

/// Key holding the tag list.
pub const TAGS_KEY: &str = "tria-tags";

/// Key holding the data layout version.
pub const VERSION_KEY: &str = "tria-data-version";

const CHECK_KEY: &str = "__storage_test__";

/// A directory of JSON values addressed by key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) a store rooted at `root` and bring its data
    /// up to the current layout version.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;

        let store = Self { root };
        super::migration::migrate(&store).await?;

        tracing::debug!(root = %store.root.display(), "Opened JSON file store");
        Ok(store)
    }

    /// Directory holding the key files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Read and decode the value stored under `key`.
    ///
    /// A missing key is `Ok(None)`; a present but undecodable value is an error.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Encode and store `value` under `key`, replacing any previous value.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &path).await?;

        tracing::trace!(key = %key, bytes = bytes.len(), "Stored value");
        Ok(())
    }

    /// Remove `key`. Returns whether anything was removed.
    pub async fn remove(&self, key: &str) -> StoreResult<bool> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check that the store can be written to by round-tripping a scratch key.
    pub async fn is_available(&self) -> bool {
        match self.write_check().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Storage is not writable");
                false
            }
        }
    }

    async fn write_check(&self) -> StoreResult<bool> {
        self.set(CHECK_KEY, CHECK_KEY).await?;
        self.remove(CHECK_KEY).await
    }
}
