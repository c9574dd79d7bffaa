//! Remote store collaborator.
//!
//! The vault is a directory-structured key-value store reached over an
//! authenticated channel and gated by the access contract. Three operations
//! are consumed: `create`, `read` and `write`. Reading a directory path
//! returns a newline-delimited list of child ids; an empty result is an
//! empty directory, not an error.

mod memory;
mod remote;

pub use memory::MemoryVault;
pub use remote::RemoteVault;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    /// The vault server could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The vault refused the request (permissions, expired contract, ...).
    #[error("request denied: {0}")]
    Denied(String),

    /// The vault answered outside the protocol.
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Vault operations the orchestrator consumes.
///
/// Every call is bound to the access contract gating the store; the vault
/// server checks the caller's permissions against that contract.
#[async_trait]
pub trait VaultStore: Send + Sync {
    /// Initialize the vault for a freshly deployed contract.
    async fn create(&self, contract: &str) -> Result<(), VaultError>;

    /// Read a file or directory. Directory reads return newline-delimited
    /// child ids; empty string means an empty directory.
    async fn read(&self, contract: &str, path: &str) -> Result<String, VaultError>;

    /// Write file content, creating or replacing it.
    async fn write(&self, contract: &str, path: &str, data: &str) -> Result<(), VaultError>;
}

/// Split a directory listing into child ids.
pub fn split_directory_listing(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_empty_listing() {
        assert!(split_directory_listing("").is_empty());
        assert!(split_directory_listing("\n").is_empty());
    }

    #[test]
    fn test_split_listing() {
        assert_eq!(split_directory_listing("a\nb"), vec!["a", "b"]);
        // Trailing newline does not produce a phantom entry.
        assert_eq!(split_directory_listing("a\nb\n"), vec!["a", "b"]);
    }
}
