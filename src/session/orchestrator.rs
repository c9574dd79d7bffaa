//! The bootstrap orchestrator.
//!
//! Drives a session from whatever the persisted identity record says to a
//! loaded item list:
//!
//! ```text
//! cold start ──deploy──▶ identity ──create──▶ vault ready ──load──▶ ready
//!                            │
//!                         expired ──▶ persisted state discarded
//! ```
//!
//! Identity deployment and vault construction are two independent remote
//! operations tracked by separate persisted flags, so a session that crashed
//! between them resumes where it left off instead of re-deploying.

use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use super::{ItemReadError, SessionError, SessionPhase};
use crate::cipher::Cipher;
use crate::config::ExpiryCheck;
use crate::identity::{IdentityRecord, IdentityStore};
use crate::item::{ItemContent, ItemState, TodoItem};
use crate::registrar::IdentityRegistrar;
use crate::vault::{split_directory_listing, VaultStore};

/// Everything the orchestrator needs, injected at construction.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Access contract bytecode deployed on cold start.
    pub contract_bytecode: String,
    /// Directory under which item files live.
    pub todo_dir: String,
    /// When a persisted identity is verified against the registrar.
    pub expiry_check: ExpiryCheck,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            contract_bytecode: crate::contract::TODO_LIST_BYTECODE.to_string(),
            todo_dir: crate::contract::TODO_DIRECTORY.to_string(),
            expiry_check: ExpiryCheck::Always,
        }
    }
}

/// One user session over one identity.
///
/// Owns the phase machine, the live item list, and the collaborator handles.
/// There is exactly one writer per identity, so no cross-session locking
/// exists anywhere.
pub struct Session {
    config: SessionConfig,
    registrar: Arc<dyn IdentityRegistrar>,
    vault: Arc<dyn VaultStore>,
    cipher: Arc<dyn Cipher>,
    identity_store: IdentityStore,
    phase: watch::Sender<SessionPhase>,
    items: RwLock<Vec<TodoItem>>,
    /// Contract address bound after a successful bootstrap.
    address: RwLock<Option<String>>,
}

impl Session {
    pub fn new(
        config: SessionConfig,
        registrar: Arc<dyn IdentityRegistrar>,
        vault: Arc<dyn VaultStore>,
        cipher: Arc<dyn Cipher>,
        identity_store: IdentityStore,
    ) -> Self {
        let (phase, _) = watch::channel(SessionPhase::Idle);
        Self {
            config,
            registrar,
            vault,
            cipher,
            identity_store,
            phase,
            items: RwLock::new(Vec::new()),
            address: RwLock::new(None),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase.borrow().clone()
    }

    /// Observe phase transitions.
    pub fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.phase.subscribe()
    }

    /// Snapshot of the live item list.
    pub async fn items(&self) -> Vec<TodoItem> {
        self.items.read().await.clone()
    }

    /// The persisted identity record as currently stored.
    pub fn identity(&self) -> Result<IdentityRecord, SessionError> {
        Ok(self.identity_store.load()?)
    }

    /// Run the bootstrap sequence to completion.
    ///
    /// Terminates in `Ready`, `Expired`, or `Failed`. Any error is also
    /// published as the `Failed` phase. No step retries automatically;
    /// recovery is a fresh bootstrap.
    pub async fn bootstrap(&self) -> Result<(), SessionError> {
        match self.run_bootstrap().await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.phase.send_replace(SessionPhase::Failed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn run_bootstrap(&self) -> Result<(), SessionError> {
        let mut record = self.identity_store.load()?;

        let address = match record.address.clone() {
            Some(address) => {
                if self.should_check_expiry(&record) {
                    self.set_phase(SessionPhase::CheckingIdentity);
                    let expired = self
                        .registrar
                        .has_expired(&address)
                        .await
                        .map_err(SessionError::IdentityQuery)?;
                    if expired {
                        info!(address = %address, "access contract terminated, discarding identity");
                        self.identity_store.clear()?;
                        self.items.write().await.clear();
                        self.set_phase(SessionPhase::Expired);
                        return Ok(());
                    }
                }
                address
            }
            None => {
                self.set_phase(SessionPhase::DeployingIdentity);
                info!("cold start, deploying access contract");
                let address = self
                    .registrar
                    .deploy(&self.config.contract_bytecode, &[])
                    .await
                    .map_err(SessionError::IdentityDeploy)?;
                record.address = Some(address.clone());
                record.vault_ready = false;
                self.identity_store.save(&record)?;
                info!(address = %address, "access contract deployed");
                address
            }
        };

        if !record.vault_ready {
            self.set_phase(SessionPhase::ConstructingVault);
            info!(address = %address, "constructing vault");
            self.vault
                .create(&address)
                .await
                .map_err(SessionError::VaultCreate)?;
            record.vault_ready = true;
            self.identity_store.save(&record)?;
        }

        *self.address.write().await = Some(address.clone());

        self.set_phase(SessionPhase::Loading);
        self.load(&address).await?;
        self.set_phase(SessionPhase::Ready);
        Ok(())
    }

    /// Rebuild the live list from the vault.
    ///
    /// Item fetches run concurrently but the list is assembled in directory
    /// order before publishing. A failed entry is logged and skipped; a
    /// failed directory read aborts the load.
    async fn load(&self, contract: &str) -> Result<(), SessionError> {
        let listing = self
            .vault
            .read(contract, &self.config.todo_dir)
            .await
            .map_err(SessionError::DirectoryRead)?;
        let ids = split_directory_listing(&listing);
        debug!(count = ids.len(), "todo directory listed");

        let fetches = ids.iter().map(|id| self.fetch_item(contract, id));
        let results = futures::future::join_all(fetches).await;

        let mut live = Vec::new();
        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(Some(item)) => live.push(item),
                Ok(None) => debug!(id = %id, "skipping tombstoned item"),
                Err(e) => warn!(id = %id, error = %e, "skipping unreadable item"),
            }
        }

        info!(count = live.len(), "todo list loaded");
        *self.items.write().await = live;
        Ok(())
    }

    async fn fetch_item(
        &self,
        contract: &str,
        id: &str,
    ) -> Result<Option<TodoItem>, ItemReadError> {
        let envelope = self.vault.read(contract, &self.item_path(id)).await?;
        let payload = self.cipher.open(&envelope)?;
        let content: ItemContent = serde_json::from_slice(&payload)?;
        if !content.is_live() {
            return Ok(None);
        }
        Ok(Some(TodoItem {
            id: id.to_string(),
            content,
        }))
    }

    /// Create a new active item.
    ///
    /// The local list only reflects the item once the vault confirms the
    /// write.
    pub async fn add(&self, title: impl Into<String>) -> Result<TodoItem, SessionError> {
        let contract = self.require_ready().await?;
        let item = TodoItem::new(title);
        self.write_item(&contract, &item).await?;
        self.items.write().await.push(item.clone());
        info!(id = %item.id, "item added");
        Ok(item)
    }

    /// Flip an item between active and completed.
    pub async fn toggle(&self, id: &str) -> Result<TodoItem, SessionError> {
        let contract = self.require_ready().await?;
        let mut item = self.find_item(id).await?;
        item.content.toggle();
        self.write_item(&contract, &item).await?;

        let mut items = self.items.write().await;
        if let Some(slot) = items.iter_mut().find(|t| t.id == id) {
            *slot = item.clone();
        }
        info!(id = %item.id, state = ?item.content.state, "item toggled");
        Ok(item)
    }

    /// Delete an item: the tombstone is persisted remotely, then the item
    /// leaves the local list.
    pub async fn delete(&self, id: &str) -> Result<(), SessionError> {
        let contract = self.require_ready().await?;
        let mut item = self.find_item(id).await?;
        item.content.state = ItemState::Deleted;
        self.write_item(&contract, &item).await?;

        self.items.write().await.retain(|t| t.id != id);
        info!(id = %id, "item deleted");
        Ok(())
    }

    /// Discard the persisted identity and return to cold start.
    pub async fn reset(&self) -> Result<(), SessionError> {
        self.identity_store.clear()?;
        self.items.write().await.clear();
        *self.address.write().await = None;
        self.phase.send_replace(SessionPhase::Idle);
        info!("session reset to cold start");
        Ok(())
    }

    fn should_check_expiry(&self, record: &IdentityRecord) -> bool {
        match self.config.expiry_check {
            ExpiryCheck::Always => true,
            ExpiryCheck::VaultReadyOnly => record.vault_ready,
            ExpiryCheck::Never => false,
        }
    }

    async fn require_ready(&self) -> Result<String, SessionError> {
        let phase = self.phase();
        if phase != SessionPhase::Ready {
            return Err(SessionError::NotReady(phase));
        }
        self.address
            .read()
            .await
            .clone()
            .ok_or(SessionError::NotReady(SessionPhase::Idle))
    }

    async fn find_item(&self, id: &str) -> Result<TodoItem, SessionError> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownItem(id.to_string()))
    }

    async fn write_item(&self, contract: &str, item: &TodoItem) -> Result<(), SessionError> {
        let payload = serde_json::to_vec(&item.content).map_err(|e| SessionError::ItemEncode {
            id: item.id.clone(),
            source: e,
        })?;
        let envelope = self.cipher.seal(&payload)?;
        self.vault
            .write(contract, &self.item_path(&item.id), &envelope)
            .await
            .map_err(|e| SessionError::ItemWrite {
                id: item.id.clone(),
                source: e,
            })
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.config.todo_dir, id)
    }

    fn set_phase(&self, phase: SessionPhase) {
        debug!(phase = %phase, "session phase");
        self.phase.send_replace(phase);
    }
}
