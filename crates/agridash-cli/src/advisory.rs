//! `advisory` command handlers.

use std::time::Duration;

use agridash_advisory::{AdvisoryClient, AdvisoryReport, ChatTranscript};
use agridash_core::AppConfig;
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum AdvisoryCommands {
    /// Show current sensor readings and the advisory
    Show {
        /// District to report on (defaults to AGRIDASH_DEFAULT_DISTRICT)
        #[arg(long)]
        district: Option<String>,
        /// Keep refreshing the report until interrupted
        #[arg(long)]
        watch: bool,
        /// Seconds between refreshes in watch mode
        #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
        interval_secs: u64,
    },
    /// Ask the agronomist a question
    Chat {
        #[arg(long)]
        message: String,
        #[arg(long)]
        district: Option<String>,
    },
}

fn sensor(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "--".to_string(), |v| format!("{v}{unit}"))
}

fn print_report(report: &AdvisoryReport) {
    println!("{} | {} | updated {}", report.location, report.season, report.updated_at());
    println!(
        "Forecast: {} ({}% confidence)",
        report.analysis.forecast, report.analysis.confidence
    );
    let marker = if report.is_hold_action() { "HOLD" } else { "GO" };
    println!("Action [{marker}]: {}", report.analysis.action);
    println!("  {}", report.analysis.reason);

    let s = &report.sensors;
    let soil_note = if report.soil_is_dry() { " (dry)" } else { "" };
    println!(
        "Temp {} | Humidity {} | Soil {}{soil_note} | Pressure {}",
        sensor(s.temperature, "°C"),
        sensor(s.humidity, "%"),
        sensor(s.soil_moisture, "%"),
        sensor(s.pressure, " hPa"),
    );
    println!();
    println!("{}", report.cleaned_advisory());
}

/// Re-fetches the report every `period` until Ctrl-C. Failed fetches are
/// logged and the next tick tries again.
async fn watch_reports(client: &AdvisoryClient, district: &str, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("advisory watch stopped");
                return;
            }
        }
        match client.fetch_advisory(Some(district)).await {
            Ok(report) => {
                print_report(&report);
                println!();
            }
            Err(e) => {
                tracing::warn!(district, error = %e, "advisory refresh failed; retrying next tick");
            }
        }
    }
}

pub(crate) async fn run(config: &AppConfig, command: AdvisoryCommands) -> anyhow::Result<()> {
    let client = AdvisoryClient::new(&config.advisory_base_url, config.advisory_timeout_secs)?;
    match command {
        AdvisoryCommands::Show {
            district,
            watch,
            interval_secs,
        } => {
            let district = district.unwrap_or_else(|| config.default_district.clone());
            if watch {
                watch_reports(&client, &district, Duration::from_secs(interval_secs)).await;
            } else {
                let report = client.fetch_advisory(Some(&district)).await?;
                print_report(&report);
            }
        }
        AdvisoryCommands::Chat { message, district } => {
            let district = district.unwrap_or_else(|| config.default_district.clone());
            let report = client.fetch_advisory(Some(&district)).await?;
            let mut transcript = ChatTranscript::from_report(&report);
            if transcript.send(&client, &message).await.is_none() {
                anyhow::bail!("message must not be blank");
            }
            for message in transcript.messages() {
                println!("[{:?}] {}", message.sender, message.text);
            }
        }
    }
    Ok(())
}
