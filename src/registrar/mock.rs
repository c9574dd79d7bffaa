//! Mock registrar for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::{IdentityRegistrar, RegistrarError};

/// Mock registrar with configurable responses and call counters.
pub struct MockRegistrar {
    address: String,
    expired: AtomicBool,
    fail_deploy: bool,
    fail_query: bool,
    deploy_calls: AtomicU32,
    expiry_calls: AtomicU32,
}

impl MockRegistrar {
    /// Create a mock that deploys to the given address and never expires.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            expired: AtomicBool::new(false),
            fail_deploy: false,
            fail_query: false,
            deploy_calls: AtomicU32::new(0),
            expiry_calls: AtomicU32::new(0),
        }
    }

    /// Report the contract as expired.
    pub fn with_expired(self, expired: bool) -> Self {
        self.expired.store(expired, Ordering::SeqCst);
        self
    }

    /// Fail every deploy attempt.
    pub fn with_deploy_failure(mut self) -> Self {
        self.fail_deploy = true;
        self
    }

    /// Fail every expiry query.
    pub fn with_query_failure(mut self) -> Self {
        self.fail_query = true;
        self
    }

    /// Number of deploy attempts so far.
    pub fn deploy_calls(&self) -> u32 {
        self.deploy_calls.load(Ordering::SeqCst)
    }

    /// Number of expiry queries so far.
    pub fn expiry_calls(&self) -> u32 {
        self.expiry_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockRegistrar {
    fn default() -> Self {
        Self::new("0x00000000000000000000000000000000000000aa")
    }
}

#[async_trait]
impl IdentityRegistrar for MockRegistrar {
    async fn deploy(
        &self,
        _bytecode: &str,
        _args: &[serde_json::Value],
    ) -> Result<String, RegistrarError> {
        self.deploy_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_deploy {
            return Err(RegistrarError::Rejected("mock deploy failure".to_string()));
        }
        Ok(self.address.clone())
    }

    async fn has_expired(&self, _address: &str) -> Result<bool, RegistrarError> {
        self.expiry_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_query {
            return Err(RegistrarError::Network("mock query failure".to_string()));
        }
        Ok(self.expired.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let registrar = MockRegistrar::new("0xabc");
        assert_eq!(registrar.deploy_calls(), 0);

        let address = registrar.deploy("6080", &[]).await.unwrap();
        assert_eq!(address, "0xabc");
        assert_eq!(registrar.deploy_calls(), 1);

        assert!(!registrar.has_expired("0xabc").await.unwrap());
        assert_eq!(registrar.expiry_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_failures() {
        let registrar = MockRegistrar::default().with_deploy_failure();
        assert!(registrar.deploy("6080", &[]).await.is_err());

        let registrar = MockRegistrar::default().with_expired(true);
        assert!(registrar.has_expired("0xabc").await.unwrap());
    }
}
