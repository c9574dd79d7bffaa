//! Todo item data contract.
//!
//! Items are stored in the vault as one JSON file per item, keyed by an
//! address-shaped random id. Deletion is a tombstone: the record stays in the
//! vault with state `deleted` and is filtered out of every live listing.

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a todo item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Active,
    Completed,
    Deleted,
}

/// Item content as written to the vault: exactly `title` and `state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemContent {
    pub title: String,
    pub state: ItemState,
}

impl ItemContent {
    /// Whether the item belongs in the live list.
    pub fn is_live(&self) -> bool {
        self.state != ItemState::Deleted
    }

    /// Flip between active and completed. Tombstones are never revived.
    pub fn toggle(&mut self) {
        self.state = match self.state {
            ItemState::Active => ItemState::Completed,
            ItemState::Completed => ItemState::Active,
            ItemState::Deleted => ItemState::Deleted,
        };
    }
}

/// A todo item: vault file id plus its content record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub content: ItemContent,
}

impl TodoItem {
    /// Create a fresh active item with a random id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            content: ItemContent {
                title: title.into(),
                state: ItemState::Active,
            },
        }
    }
}

/// Generate an address-shaped random id (20 random bytes, hex).
///
/// Ids are content-independent; collision probability is accepted as
/// negligible. Not cryptographically hardened.
pub fn generate_id() -> String {
    let mut bytes = [0u8; 20];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}
