//! Stock tracking over a [`KeyValueStore`].

use chrono::Utc;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::InventoryError;
use crate::store::KeyValueStore;
use crate::types::{HistoryAction, HistoryItem, HistoryRecord, Item, NewItem, StockStatus};

/// Storage key of the item list.
pub const INVENTORY_KEY: &str = "agriInventory";
/// Storage key of the action history.
pub const HISTORY_KEY: &str = "agriInventoryHistory";

/// Farm input inventory with an action history.
///
/// Every mutation updates memory first and then writes both keys. A failed
/// write leaves the in-memory state changed; call [`Inventory::save`] to
/// retry.
pub struct Inventory<S> {
    store: S,
    items: Vec<Item>,
    history: Vec<HistoryRecord>,
}

impl<S: KeyValueStore> Inventory<S> {
    /// Loads items and history from `store`. Missing, unreadable or corrupt
    /// entries start empty.
    pub fn load(store: S) -> Self {
        let items = read_or_default(&store, INVENTORY_KEY);
        let mut history: Vec<HistoryRecord> = read_or_default(&store, HISTORY_KEY);
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self {
            store,
            items,
            history,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Newest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Items that are not [`StockStatus::Optimal`].
    #[must_use]
    pub fn low_stock_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.status != StockStatus::Optimal)
            .count()
    }

    /// Adds a new item and records it in the history.
    ///
    /// # Errors
    ///
    /// [`InventoryError::Invalid`] for a blank name or a quantity that is
    /// not a positive finite number; nothing changes in that case.
    /// [`InventoryError::Storage`] when the item was added but not saved.
    pub fn add(&mut self, new: NewItem) -> Result<Item, InventoryError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(InventoryError::Invalid("name must not be blank".to_string()));
        }
        if !new.quantity.is_finite() || new.quantity <= 0.0 {
            return Err(InventoryError::Invalid(format!(
                "quantity must be a positive number, got {}",
                new.quantity
            )));
        }

        let item = Item {
            id: Uuid::new_v4(),
            kind: new.kind,
            name: name.to_string(),
            quantity: new.quantity,
            unit: new.unit,
            status: StockStatus::for_quantity(new.quantity),
        };
        self.items.push(item.clone());
        self.record(HistoryAction::Added, &item);
        tracing::info!(id = %item.id, name = %item.name, status = %item.status, "inventory item added");

        self.save()?;
        Ok(item)
    }

    /// Removes an item and records the deletion.
    ///
    /// # Errors
    ///
    /// [`InventoryError::NotFound`] for an unknown id,
    /// [`InventoryError::Storage`] when the removal was not saved.
    pub fn remove(&mut self, id: Uuid) -> Result<Item, InventoryError> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(InventoryError::NotFound(id))?;
        let item = self.items.remove(index);
        self.record(HistoryAction::Deleted, &item);
        tracing::info!(id = %item.id, name = %item.name, "inventory item removed");

        self.save()?;
        Ok(item)
    }

    /// Writes items and history to the store.
    ///
    /// # Errors
    ///
    /// Returns the first encoding or storage failure.
    pub fn save(&self) -> Result<(), InventoryError> {
        let items = serde_json::to_vec(&self.items)?;
        let history = serde_json::to_vec(&self.history)?;
        self.store.set(INVENTORY_KEY, &items)?;
        self.store.set(HISTORY_KEY, &history)?;
        Ok(())
    }

    fn record(&mut self, action: HistoryAction, item: &Item) {
        self.history.insert(
            0,
            HistoryRecord {
                id: Uuid::new_v4(),
                action,
                item: HistoryItem::from(item),
                timestamp: Utc::now(),
            },
        );
    }
}

fn read_or_default<S, T>(store: &S, key: &str) -> Vec<T>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    let bytes = match store.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read inventory storage; starting empty");
            return Vec::new();
        }
    };
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "corrupt inventory entry; starting empty");
        Vec::new()
    })
}

#[cfg(test)]
#[path = "inventory_test.rs"]
mod tests;
