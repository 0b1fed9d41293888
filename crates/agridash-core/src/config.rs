use crate::app_config::{AppConfig, Environment, RemoteFailurePolicy};
use crate::geo::Coordinate;
use crate::ConfigError;

/// The geocoder must be asked for at least this many candidates; the keyword
/// filter discards a large share of them.
pub const MIN_GEOCODER_RESULT_LIMIT: u32 = 30;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("AGRIDASH_ENV", "development"))?;
    let log_level = or_default("AGRIDASH_LOG_LEVEL", "info");

    let locationiq_api_key = lookup("LOCATIONIQ_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    let geocoder_base_url = or_default(
        "AGRIDASH_GEOCODER_BASE_URL",
        "https://us1.locationiq.com/v1/",
    );
    let geocoder_timeout_secs = parse_u64("AGRIDASH_GEOCODER_TIMEOUT_SECS", "30")?;
    let geocoder_result_limit = parse_u32("AGRIDASH_GEOCODER_RESULT_LIMIT", "30")?;
    if geocoder_result_limit < MIN_GEOCODER_RESULT_LIMIT {
        return Err(invalid(
            "AGRIDASH_GEOCODER_RESULT_LIMIT",
            format!("must be at least {MIN_GEOCODER_RESULT_LIMIT}, got {geocoder_result_limit}"),
        ));
    }
    let remote_failure_policy =
        parse_remote_failure_policy(&or_default("AGRIDASH_REMOTE_FAILURE_POLICY", "fallback"))?;

    let trusted_shops_path = PathBuf::from(or_default(
        "AGRIDASH_TRUSTED_SHOPS_PATH",
        "./config/trusted_shops.yaml",
    ));

    let default_location = Coordinate::new(
        parse_f64("AGRIDASH_DEFAULT_LAT", "13.0487")?,
        parse_f64("AGRIDASH_DEFAULT_LON", "80.2461")?,
    );
    if !default_location.is_valid() {
        return Err(invalid(
            "AGRIDASH_DEFAULT_LAT",
            format!(
                "default location ({}, {}) is out of range",
                default_location.lat, default_location.lon
            ),
        ));
    }
    let geolocation_timeout_secs = parse_u64("AGRIDASH_GEOLOCATION_TIMEOUT_SECS", "15")?;

    let advisory_base_url = or_default("AGRIDASH_ADVISORY_BASE_URL", "http://localhost:8000/api/");
    let advisory_timeout_secs = parse_u64("AGRIDASH_ADVISORY_TIMEOUT_SECS", "60")?;
    let default_district = or_default("AGRIDASH_DEFAULT_DISTRICT", "Chennai");

    let inventory_dir = PathBuf::from(or_default("AGRIDASH_INVENTORY_DIR", "./data/inventory"));
    let storage_quota_bytes = parse_u64("AGRIDASH_STORAGE_QUOTA_BYTES", "5242880")?;

    Ok(AppConfig {
        env,
        log_level,
        locationiq_api_key,
        geocoder_base_url,
        geocoder_timeout_secs,
        geocoder_result_limit,
        remote_failure_policy,
        trusted_shops_path,
        default_location,
        geolocation_timeout_secs,
        advisory_base_url,
        advisory_timeout_secs,
        default_district,
        inventory_dir,
        storage_quota_bytes,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "AGRIDASH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_remote_failure_policy(s: &str) -> Result<RemoteFailurePolicy, ConfigError> {
    match s {
        "fallback" => Ok(RemoteFailurePolicy::UseFallbackOnly),
        "propagate" => Ok(RemoteFailurePolicy::Propagate),
        other => Err(ConfigError::InvalidEnvVar {
            var: "AGRIDASH_REMOTE_FAILURE_POLICY".to_string(),
            reason: format!("expected 'fallback' or 'propagate', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
