//! Identity registrar collaborator.
//!
//! The registrar owns the on-chain access-control record gating the vault:
//! it deploys the fixed contract and answers expiry queries. It is the
//! authority on identity validity; the persisted record is only a cache of
//! the deployed address.

mod gateway;
mod mock;

pub use gateway::GatewayRegistrar;
pub use mock::MockRegistrar;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistrarError {
    /// The gateway could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The gateway processed the request but refused it.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The gateway answered with something unintelligible.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Access-control record operations the orchestrator consumes.
#[async_trait]
pub trait IdentityRegistrar: Send + Sync {
    /// Deploy the access-control contract, returning its address.
    ///
    /// Single attempt; the caller never retries automatically.
    async fn deploy(
        &self,
        bytecode: &str,
        args: &[serde_json::Value],
    ) -> Result<String, RegistrarError>;

    /// Whether the contract at `address` has been terminated.
    async fn has_expired(&self, address: &str) -> Result<bool, RegistrarError>;
}
