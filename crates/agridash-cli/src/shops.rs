//! `shops` command handlers.

use std::time::Duration;

use agridash_core::{load_trusted_shops, AppConfig, Coordinate};
use agridash_shops::{
    search_near_me, FixedLocation, LocateOptions, LocationIqClient, LocationProvider, NoLocation,
    PipelineSettings, SearchOutcome, ShopSearchPipeline,
};
use anyhow::Context;
use clap::Subcommand;

/// Sub-commands available under `shops`.
#[derive(Debug, Subcommand)]
pub enum ShopsCommands {
    /// Search shops by keyword around a point (defaults to the configured location)
    Search {
        /// Search text (defaults to "agro shop")
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Print the full outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search around the device position; without a fix, shows default shops
    NearMe {
        /// Device fix; omit to simulate a device without geolocation
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        #[arg(long)]
        json: bool,
    },
}

fn coordinate(lat: Option<f64>, lon: Option<f64>) -> Option<Coordinate> {
    lat.zip(lon).map(|(lat, lon)| Coordinate::new(lat, lon))
}

/// Search center from `--lat/--lon`, else the configured default location.
pub(crate) fn search_center(
    config: &AppConfig,
    lat: Option<f64>,
    lon: Option<f64>,
) -> Coordinate {
    coordinate(lat, lon).unwrap_or(config.default_location)
}

/// Builds the pipeline even without an API key: the geocoder then rejects
/// the request and searches fall back to the trusted shops.
pub(crate) fn build_pipeline(
    config: &AppConfig,
) -> anyhow::Result<ShopSearchPipeline<LocationIqClient>> {
    let api_key = config.locationiq_api_key.as_deref().unwrap_or_else(|| {
        tracing::warn!("LOCATIONIQ_API_KEY is not set; only trusted shops will be shown");
        ""
    });
    let trusted = load_trusted_shops(&config.trusted_shops_path).with_context(|| {
        format!(
            "loading trusted shops from {}",
            config.trusted_shops_path.display()
        )
    })?;
    let client = LocationIqClient::with_base_url(
        api_key,
        config.geocoder_timeout_secs,
        &config.geocoder_base_url,
    )?;
    Ok(ShopSearchPipeline::new(
        client,
        PipelineSettings::from_config(config, &trusted),
    ))
}

pub(crate) async fn run(config: &AppConfig, command: ShopsCommands) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config)?;
    match command {
        ShopsCommands::Search {
            query,
            lat,
            lon,
            json,
        } => {
            let center = search_center(config, lat, lon);
            let outcome = pipeline.search(&query, Some(center)).await?;
            print_outcome(&outcome, json)
        }
        ShopsCommands::NearMe { lat, lon, json } => {
            let provider: Box<dyn LocationProvider> = match coordinate(lat, lon) {
                Some(fix) => Box::new(FixedLocation(fix)),
                None => Box::new(NoLocation),
            };
            let options = LocateOptions::default()
                .with_timeout(Duration::from_secs(config.geolocation_timeout_secs));
            let result = search_near_me(
                &pipeline,
                provider.as_ref(),
                options,
                &pipeline.settings().default_query,
            )
            .await?;
            if let Some(notice) = &result.notice {
                eprintln!("{notice}");
            }
            print_outcome(&result.outcome, json)
        }
    }
}

fn print_outcome(outcome: &SearchOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    println!(
        "{} shops (map center {:.4},{:.4} zoom {})",
        outcome.shops.len(),
        outcome.view.center.lat,
        outcome.view.center.lon,
        outcome.view.zoom
    );
    for shop in &outcome.shops {
        let marker = if shop.is_trusted { "*" } else { " " };
        println!("{marker} {:<40} {:>12}", shop.display_name(), shop.distance_label());
        let address = shop.address_line();
        if !address.is_empty() {
            println!("    {address}");
        }
        println!("    {}", shop.maps_url());
    }
    Ok(())
}
