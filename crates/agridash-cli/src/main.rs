mod advisory;
mod inventory;
mod shops;

use agridash_core::View;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::advisory::AdvisoryCommands;
use crate::inventory::InventoryCommands;
use crate::shops::ShopsCommands;

#[derive(Debug, Parser)]
#[command(name = "agridash")]
#[command(about = "Farm advisory dashboard: shop finder, advisory chat and input inventory")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find agricultural input shops
    Shops {
        #[command(subcommand)]
        command: ShopsCommands,
    },
    /// Sensor readings, advisory and agronomist chat
    Advisory {
        #[command(subcommand)]
        command: AdvisoryCommands,
    },
    /// Track seed, fertilizer and pesticide stock
    Inventory {
        #[command(subcommand)]
        command: InventoryCommands,
    },
}

impl Commands {
    /// Dashboard screen the command corresponds to.
    fn view(&self) -> View {
        match self {
            Commands::Shops { .. } => View::ShopFinder,
            Commands::Advisory {
                command: AdvisoryCommands::Chat { .. },
            } => View::Chat,
            Commands::Advisory { .. } => View::Dashboard,
            Commands::Inventory { .. } => View::Inventory,
        }
    }
}

fn init_tracing(log_level: &str) {
    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = agridash_core::load_app_config()?;
    init_tracing(&config.log_level);
    tracing::debug!(env = %config.env, ?config, "configuration loaded");

    let Some(command) = cli.command else {
        println!("agridash: run `agridash --help` for available commands");
        return Ok(());
    };
    tracing::debug!(view = %command.view(), "dispatching command");

    match command {
        Commands::Shops { command } => shops::run(&config, command).await,
        Commands::Advisory { command } => advisory::run(&config, command).await,
        Commands::Inventory { command } => inventory::run(&config, command),
    }
}
