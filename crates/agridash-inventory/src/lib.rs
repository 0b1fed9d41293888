//! Farm input inventory persisted through a pluggable key-value store.

pub mod error;
pub mod inventory;
pub mod store;
pub mod types;

pub use error::{InventoryError, StorageError};
pub use inventory::{Inventory, HISTORY_KEY, INVENTORY_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::{HistoryAction, HistoryItem, HistoryRecord, Item, ItemKind, NewItem, StockStatus, Unit};
