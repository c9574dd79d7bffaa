//! vaultlist - todo list client backed by a contract-gated remote vault
//!
//! A small demonstration client whose persistence layer is a remote vault
//! gated by an on-chain access contract. The crate is the orchestration
//! core: it deploys the fixed contract, constructs the vault, replays the
//! todo directory into an in-memory list, and keeps that list consistent
//! through confirmed writes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │               Session                   │
//! │   (bootstrap state machine + CRUD)      │
//! └───────┬───────────┬───────────┬─────────┘
//!         ▼           ▼           ▼
//! ┌─────────────┐ ┌─────────┐ ┌─────────┐
//! │ Identity    │ │ Vault   │ │ Cipher  │
//! │ Registrar   │ │ Store   │ │         │
//! └─────────────┘ └─────────┘ └─────────┘
//! ```
//!
//! Collaborators are traits; the real implementations speak signed HTTP,
//! the in-memory ones back the tests and dev mode.

pub mod cipher;
pub mod config;
pub mod contract;
pub mod identity;
pub mod item;
pub mod keys;
pub mod registrar;
pub mod session;
pub mod vault;

// Re-export main types for convenience
pub use cipher::{ChaChaCipher, Cipher, NoCipher};
pub use config::{Args, Command, ExpiryCheck};
pub use identity::{IdentityRecord, IdentityStore};
pub use item::{ItemContent, ItemState, TodoItem};
pub use keys::DeviceKey;
pub use registrar::{GatewayRegistrar, IdentityRegistrar, MockRegistrar};
pub use session::{Session, SessionConfig, SessionError, SessionPhase};
pub use vault::{MemoryVault, RemoteVault, VaultStore};
