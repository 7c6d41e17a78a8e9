//! Checksummed JSON snapshot of a [`MemoryStore`].
//!
//! Layout: `{ version, saved_at, checksum, store }` where `checksum` is the
//! SHA-256 of the serialized `store` value.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::{MemoryStore, StoreResult};
use crate::error::StoreError;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub checksum: String,
    pub store: MemoryStore,
}

impl StoreSnapshot {
    pub fn capture(store: &MemoryStore) -> StoreResult<Self> {
        Ok(Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            checksum: checksum_of(store)?,
            store: store.clone(),
        })
    }

    pub fn verify(&self) -> StoreResult<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(StoreError::VersionMismatch {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        if checksum_of(&self.store)? != self.checksum {
            return Err(StoreError::ChecksumMismatch);
        }
        Ok(())
    }
}

fn checksum_of(store: &MemoryStore) -> StoreResult<String> {
    let bytes = serde_json::to_vec(store)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Write `store` to `path` atomically (temp file, fsync, rename).
pub fn save_snapshot(path: &Path, store: &MemoryStore) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let snapshot = StoreSnapshot::capture(store)?;
    let data = serde_json::to_vec_pretty(&snapshot)?;
    let temp_path = path.with_extension("tmp");

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(&data)?;
        file.flush()?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)?;

    debug!("Saved {} bytes to {:?}", data.len(), path);
    Ok(())
}

pub fn load_snapshot(path: &Path) -> StoreResult<MemoryStore> {
    let data = fs::read(path)?;
    let snapshot: StoreSnapshot = serde_json::from_slice(&data)?;
    snapshot.verify()?;

    debug!("Loaded snapshot saved at {} from {:?}", snapshot.saved_at, path);
    Ok(snapshot.store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeamSeed;
    use crate::store::{LeagueRepository, TeamRepository};
    use tempfile::TempDir;

    fn sample_store() -> MemoryStore {
        MemoryStore::seeded(
            "Snapshot League",
            &[TeamSeed::new("North", 55), TeamSeed::new("South", 65)],
        )
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("league.json");

        let mut store = sample_store();
        store.increment_week().unwrap();
        save_snapshot(&path, &store).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.league().unwrap().current_week, 1);
        assert_eq!(loaded.teams().unwrap(), store.teams().unwrap());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_tampered_snapshot_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("league.json");
        save_snapshot(&path, &sample_store()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        fs::write(&path, text.replace("\"North\"", "\"Norths\"")).unwrap();

        assert!(matches!(load_snapshot(&path), Err(StoreError::ChecksumMismatch)));
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let mut snapshot = StoreSnapshot::capture(&sample_store()).unwrap();
        snapshot.version = SNAPSHOT_VERSION + 1;
        assert!(matches!(snapshot.verify(), Err(StoreError::VersionMismatch { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_snapshot(&temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
