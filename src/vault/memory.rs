//! In-memory vault for testing and dev mode.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::RwLock;

use super::{VaultError, VaultStore};

/// In-memory vault with injectable failures and call counters.
///
/// Directory semantics mirror the remote store: reading a path with children
/// returns their ids newline-delimited, in insertion-independent sorted
/// order; reading an unknown path returns an empty listing.
#[derive(Default)]
pub struct MemoryVault {
    files: RwLock<BTreeMap<String, String>>,
    failing_reads: RwLock<HashSet<String>>,
    fail_create: AtomicBool,
    fail_writes: AtomicBool,
    create_calls: AtomicU32,
    read_calls: AtomicU32,
    write_calls: AtomicU32,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file directly, bypassing the trait (for test setup).
    pub fn insert(&self, path: &str, data: &str) {
        self.files
            .write()
            .expect("memory vault lock poisoned")
            .insert(path.to_string(), data.to_string());
    }

    /// Raw file content, bypassing the trait (for test assertions).
    pub fn get(&self, path: &str) -> Option<String> {
        self.files
            .read()
            .expect("memory vault lock poisoned")
            .get(path)
            .cloned()
    }

    /// Make reads of `path` fail.
    pub fn fail_reads_of(&self, path: &str) {
        self.failing_reads
            .write()
            .expect("memory vault lock poisoned")
            .insert(path.to_string());
    }

    /// Make `create` fail.
    pub fn set_create_failure(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    /// Make every write fail.
    pub fn set_write_failure(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn create_calls(&self) -> u32 {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn read_calls(&self) -> u32 {
        self.read_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> u32 {
        self.write_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VaultStore for MemoryVault {
    async fn create(&self, _contract: &str) -> Result<(), VaultError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(VaultError::Denied("mock create failure".to_string()));
        }
        Ok(())
    }

    async fn read(&self, _contract: &str, path: &str) -> Result<String, VaultError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);

        if self
            .failing_reads
            .read()
            .expect("memory vault lock poisoned")
            .contains(path)
        {
            return Err(VaultError::Denied("mock read failure".to_string()));
        }

        let files = self.files.read().expect("memory vault lock poisoned");
        if let Some(content) = files.get(path) {
            return Ok(content.clone());
        }

        // Directory read: newline-delimited child ids.
        let prefix = format!("{path}/");
        let children: Vec<&str> = files
            .keys()
            .filter_map(|key| key.strip_prefix(prefix.as_str()))
            .collect();
        Ok(children.join("\n"))
    }

    async fn write(&self, _contract: &str, path: &str, data: &str) -> Result<(), VaultError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(VaultError::Denied("mock write failure".to_string()));
        }
        self.insert(path, data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = "0xabc";

    #[tokio::test]
    async fn test_empty_directory_reads_empty() {
        let vault = MemoryVault::new();
        assert_eq!(vault.read(CONTRACT, "0x01").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_write_then_read_file() {
        let vault = MemoryVault::new();
        vault.write(CONTRACT, "0x01/a", "content").await.unwrap();
        assert_eq!(vault.read(CONTRACT, "0x01/a").await.unwrap(), "content");
    }

    #[tokio::test]
    async fn test_directory_lists_children() {
        let vault = MemoryVault::new();
        vault.write(CONTRACT, "0x01/b", "x").await.unwrap();
        vault.write(CONTRACT, "0x01/a", "y").await.unwrap();
        assert_eq!(vault.read(CONTRACT, "0x01").await.unwrap(), "a\nb");
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let vault = MemoryVault::new();
        vault.fail_reads_of("0x01/a");
        vault.insert("0x01/a", "content");
        assert!(vault.read(CONTRACT, "0x01/a").await.is_err());

        vault.set_write_failure(true);
        assert!(vault.write(CONTRACT, "0x01/b", "x").await.is_err());
        assert!(vault.get("0x01/b").is_none());
    }
}
