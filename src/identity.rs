//! Persisted identity record.
//!
//! The only durable cross-session artifact: the deployed contract address
//! and whether the vault behind it has been constructed. On restart these
//! two fields are the sole source of truth for where the bootstrap resumes;
//! the registrar stays authoritative for validity.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

const RECORD_FILE: &str = "identity.json";

#[derive(Debug, Error)]
pub enum IdentityStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt identity record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persisted identity: contract address plus vault-ready flag.
///
/// Invariant: `vault_ready` implies `address` is set. A record violating the
/// invariant is treated as cold start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub address: Option<String>,
    #[serde(default)]
    pub vault_ready: bool,
}

impl IdentityRecord {
    /// No identity has been deployed yet.
    pub fn is_cold_start(&self) -> bool {
        self.address.is_none()
    }
}

/// On-disk store for the identity record.
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(RECORD_FILE),
        }
    }

    /// Load the persisted record. A missing file is a cold start, not an
    /// error; a record breaking the vault-ready invariant is reset.
    pub fn load(&self) -> Result<IdentityRecord, IdentityStoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(IdentityRecord::default());
            }
            Err(e) => return Err(e.into()),
        };

        let record: IdentityRecord = serde_json::from_str(&contents)?;
        if record.vault_ready && record.address.is_none() {
            warn!("identity record marks vault ready without an address, resetting");
            return Ok(IdentityRecord::default());
        }
        Ok(record)
    }

    pub fn save(&self, record: &IdentityRecord) -> Result<(), IdentityStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Discard the persisted identity (expiry or manual reset).
    pub fn clear(&self) -> Result<(), IdentityStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_cold_start() {
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::new(dir.path());
        let record = store.load().unwrap();
        assert!(record.is_cold_start());
        assert!(!record.vault_ready);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::new(dir.path());

        let record = IdentityRecord {
            address: Some("0xabc".to_string()),
            vault_ready: true,
        };
        store.save(&record).unwrap();
        assert_eq!(store.load().unwrap(), record);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::new(dir.path());

        store
            .save(&IdentityRecord {
                address: Some("0xabc".to_string()),
                vault_ready: false,
            })
            .unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_cold_start());
    }

    #[test]
    fn test_invariant_violation_resets() {
        let dir = tempfile::tempdir().unwrap();
        let store = IdentityStore::new(dir.path());

        std::fs::write(
            dir.path().join(RECORD_FILE),
            r#"{"address":null,"vault_ready":true}"#,
        )
        .unwrap();
        assert!(store.load().unwrap().is_cold_start());
    }
}
