//! Bootstrap and sync orchestration.
//!
//! `Session` drives the bootstrap state machine from cold start to a loaded
//! item list and owns the mutation operations. It is a pure state machine
//! over trait collaborators; presentation layers only observe the published
//! `SessionPhase`.

mod orchestrator;
mod state;

pub use orchestrator::{Session, SessionConfig};
pub use state::SessionPhase;

use thiserror::Error;

use crate::cipher::CipherError;
use crate::registrar::RegistrarError;
use crate::vault::VaultError;

/// Session-level failures. Every variant is terminal for the operation that
/// raised it; nothing retries automatically.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("contract deployment failed: {0}")]
    IdentityDeploy(RegistrarError),

    #[error("contract expiry query failed: {0}")]
    IdentityQuery(RegistrarError),

    #[error("vault construction failed: {0}")]
    VaultCreate(VaultError),

    #[error("todo directory read failed: {0}")]
    DirectoryRead(VaultError),

    #[error("write failed for item {id}: {source}")]
    ItemWrite { id: String, source: VaultError },

    #[error("failed to encode item {id}: {source}")]
    ItemEncode {
        id: String,
        source: serde_json::Error,
    },

    #[error("cipher failure: {0}")]
    Cipher(#[from] CipherError),

    #[error("identity record persistence failed: {0}")]
    Persist(#[from] crate::identity::IdentityStoreError),

    #[error("no such item: {0}")]
    UnknownItem(String),

    #[error("session is not ready (current phase: {0})")]
    NotReady(SessionPhase),
}

/// Per-entry load failure. Recovered locally: the entry is logged and
/// skipped, siblings are unaffected.
#[derive(Debug, Error)]
pub enum ItemReadError {
    #[error("vault read failed: {0}")]
    Vault(#[from] VaultError),

    #[error("cipher failure: {0}")]
    Cipher(#[from] CipherError),

    #[error("unparseable item record: {0}")]
    Parse(#[from] serde_json::Error),
}
