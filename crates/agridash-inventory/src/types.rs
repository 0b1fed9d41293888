//! Inventory items and history records, stored with the dashboard's field names.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Below this quantity stock is [`StockStatus::Critical`].
pub const CRITICAL_BELOW: f64 = 10.0;
/// Below this quantity stock is [`StockStatus::Low`].
pub const LOW_BELOW: f64 = 50.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    #[default]
    Seed,
    Fertilizer,
    Pesticide,
    Other,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Seed => "Seed",
            Self::Fertilizer => "Fertilizer",
            Self::Pesticide => "Pesticide",
            Self::Other => "Other",
        };
        f.pad(s)
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seed" => Ok(Self::Seed),
            "fertilizer" | "fertiliser" => Ok(Self::Fertilizer),
            "pesticide" => Ok(Self::Pesticide),
            "other" => Ok(Self::Other),
            other => Err(format!(
                "unknown item kind '{other}' (expected seed, fertilizer, pesticide or other)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Kg,
    Grams,
    Litres,
    Ml,
    Packs,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Kg => "kg",
            Self::Grams => "grams",
            Self::Litres => "litres",
            Self::Ml => "ml",
            Self::Packs => "packs",
        };
        f.pad(s)
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" => Ok(Self::Kg),
            "g" | "grams" => Ok(Self::Grams),
            "l" | "litres" | "liters" => Ok(Self::Litres),
            "ml" => Ok(Self::Ml),
            "packs" => Ok(Self::Packs),
            other => Err(format!(
                "unknown unit '{other}' (expected kg, grams, litres, ml or packs)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    Critical,
    Low,
    Optimal,
}

impl StockStatus {
    #[must_use]
    pub fn for_quantity(quantity: f64) -> Self {
        if quantity < CRITICAL_BELOW {
            Self::Critical
        } else if quantity < LOW_BELOW {
            Self::Low
        } else {
            Self::Optimal
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    pub status: StockStatus,
}

/// Input to [`crate::Inventory::add`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub kind: ItemKind,
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HistoryAction {
    Added,
    Deleted,
}

/// Snapshot of the item an action applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub quantity: f64,
    pub unit: Unit,
}

impl From<&Item> for HistoryItem {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            kind: item.kind,
            quantity: item.quantity,
            unit: item.unit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub action: HistoryAction,
    pub item: HistoryItem,
    pub timestamp: DateTime<Utc>,
}
