//! Configuration for vaultlist.
//!
//! CLI arguments and environment variable handling using clap. Everything
//! the orchestrator consumes is injected from here; there is no ambient
//! global configuration anywhere in the crate.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// vaultlist - todo list client backed by a contract-gated remote vault
#[derive(Parser, Debug, Clone)]
#[command(name = "vaultlist")]
#[command(about = "Todo list client backed by a contract-gated remote vault")]
pub struct Args {
    /// Vault server URL
    #[arg(long, env = "VAULT_URL", default_value = "https://datonavault.com:8131")]
    pub vault_url: String,

    /// Blockchain gateway URL (deploy and call relaying)
    #[arg(long, env = "GATEWAY_URL", default_value = "https://datonavault.com:8130")]
    pub gateway_url: String,

    /// Hex-encoded device private key (signs every vault request)
    #[arg(long, env = "DEVICE_KEY")]
    pub device_key: Option<String>,

    /// Directory for the persisted identity record
    #[arg(long, env = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory address holding the todo item files
    #[arg(long, env = "TODO_DIR", default_value = crate::contract::TODO_DIRECTORY)]
    pub todo_dir: String,

    /// When a persisted identity is verified against the registrar
    #[arg(long, env = "EXPIRY_CHECK", value_enum, default_value = "always")]
    pub expiry_check: ExpiryCheck,

    /// Encrypt item payloads before they reach the vault
    #[arg(long, env = "ENCRYPT_ITEMS", default_value = "false")]
    pub encrypt_items: bool,

    /// Run against in-memory collaborators (no network, throwaway state)
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Expiry-check policy for a persisted identity.
///
/// The registrar can invalidate access out-of-band, so a persisted ready
/// state is only as trustworthy as this policy makes it.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryCheck {
    /// Verify any persisted address before trusting it.
    Always,
    /// Verify only when the vault was already marked ready.
    VaultReadyOnly,
    /// Trust persisted state unconditionally.
    Never,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the live todo list
    List,
    /// Add a new todo item
    Add { title: String },
    /// Toggle an item between active and completed
    Toggle { id: String },
    /// Delete an item (persisted as a tombstone)
    Delete { id: String },
    /// Show the persisted identity and session state
    Status,
    /// Discard the persisted identity and start over
    Reset,
}

impl Args {
    /// Effective data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(".vaultlist"))
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.dev_mode && self.device_key.is_none() {
            return Err("DEVICE_KEY is required outside dev mode".to_string());
        }
        if !self.todo_dir.starts_with("0x") {
            return Err("TODO_DIR must be an address (0x...)".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv.iter().copied()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["vaultlist", "--dev-mode", "list"]);
        assert_eq!(args.todo_dir, crate::contract::TODO_DIRECTORY);
        assert_eq!(args.expiry_check, ExpiryCheck::Always);
        assert!(!args.encrypt_items);
        assert_eq!(args.data_dir(), PathBuf::from(".vaultlist"));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_device_key_required_outside_dev_mode() {
        let args = parse(&["vaultlist", "list"]);
        assert!(args.validate().is_err());

        let args = parse(&["vaultlist", "--device-key", "00", "list"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_expiry_check_values() {
        let args = parse(&["vaultlist", "--expiry-check", "vault-ready-only", "list"]);
        assert_eq!(args.expiry_check, ExpiryCheck::VaultReadyOnly);

        let args = parse(&["vaultlist", "--expiry-check", "never", "list"]);
        assert_eq!(args.expiry_check, ExpiryCheck::Never);
    }

    #[test]
    fn test_rejects_non_address_todo_dir() {
        let args = parse(&["vaultlist", "--dev-mode", "--todo-dir", "todos", "list"]);
        assert!(args.validate().is_err());
    }
}
