//! Data layout versioning.
//!
//! The stored version number says which layout the key files follow. Opening
//! a store runs every migration between the stored version and
//! [`CURRENT_DATA_VERSION`], then records the new version.

use super::json_store::{JsonFileStore, VERSION_KEY};
use crate::error::StoreResult;

/// Layout version written by this build.
pub const CURRENT_DATA_VERSION: u32 = 1;

/// Version recorded in the store; an absent key means version 0.
pub async fn stored_version(store: &JsonFileStore) -> StoreResult<u32> {
    Ok(store.get::<u32>(VERSION_KEY).await?.unwrap_or(0))
}

/// Whether the store predates the current layout.
pub async fn needs_migration(store: &JsonFileStore) -> StoreResult<bool> {
    Ok(stored_version(store).await? < CURRENT_DATA_VERSION)
}

/// Migrate the store to [`CURRENT_DATA_VERSION`].
///
/// Returns the version the store is at afterwards. Stores written by a newer
/// build are left alone.
pub async fn migrate(store: &JsonFileStore) -> StoreResult<u32> {
    let version = stored_version(store).await?;
    if version >= CURRENT_DATA_VERSION {
        return Ok(version);
    }

    // 0 -> 1: first versioned layout, the key files are already in shape.

    store.set(VERSION_KEY, &CURRENT_DATA_VERSION).await?;
    tracing::info!(
        from = version,
        to = CURRENT_DATA_VERSION,
        "Migrated stored data"
    );
    Ok(CURRENT_DATA_VERSION)
}
