//! `inventory` command handlers.

use agridash_core::AppConfig;
use agridash_inventory::{FileStore, Inventory, ItemKind, NewItem, Unit};
use clap::Subcommand;
use uuid::Uuid;

#[derive(Debug, Subcommand)]
pub enum InventoryCommands {
    /// List stock items
    List,
    /// Add a stock item
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        quantity: f64,
        /// seed, fertilizer, pesticide or other
        #[arg(long, default_value = "seed")]
        kind: ItemKind,
        /// kg, grams, litres, ml or packs
        #[arg(long, default_value = "kg")]
        unit: Unit,
    },
    /// Remove a stock item by id
    Remove {
        #[arg(long)]
        id: Uuid,
    },
    /// Show added/removed history, newest first
    History,
}

pub(crate) fn run(config: &AppConfig, command: InventoryCommands) -> anyhow::Result<()> {
    let store = FileStore::open(&config.inventory_dir, Some(config.storage_quota_bytes))?;
    let mut inventory = Inventory::load(store);

    match command {
        InventoryCommands::List => {
            let low = inventory.low_stock_count();
            if low > 0 {
                println!("{low} item(s) need restocking");
            }
            for item in inventory.items() {
                println!(
                    "{}  {:<10} {:<30} {:>8} {:<6} {}",
                    item.id, item.kind, item.name, item.quantity, item.unit, item.status
                );
            }
        }
        InventoryCommands::Add {
            name,
            quantity,
            kind,
            unit,
        } => {
            let item = inventory.add(NewItem {
                kind,
                name,
                quantity,
                unit,
            })?;
            println!("added {} ({}) [{}]", item.name, item.id, item.status);
        }
        InventoryCommands::Remove { id } => {
            let item = inventory.remove(id)?;
            println!("removed {}", item.name);
        }
        InventoryCommands::History => {
            for record in inventory.history() {
                println!(
                    "{}  {:?}  {} {} {} ({})",
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    record.action,
                    record.item.quantity,
                    record.item.unit,
                    record.item.name,
                    record.item.kind
                );
            }
        }
    }
    Ok(())
}
