use std::path::PathBuf;

use crate::geo::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// What the shop search does when the geocoder cannot be reached or returns
/// an unusable payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemoteFailurePolicy {
    /// Continue with an empty remote result set; only trusted shops are shown.
    #[default]
    UseFallbackOnly,
    /// Return the geocoder error to the caller.
    Propagate,
}

impl std::fmt::Display for RemoteFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteFailurePolicy::UseFallbackOnly => write!(f, "fallback"),
            RemoteFailurePolicy::Propagate => write!(f, "propagate"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub locationiq_api_key: Option<String>,
    pub geocoder_base_url: String,
    pub geocoder_timeout_secs: u64,
    pub geocoder_result_limit: u32,
    pub remote_failure_policy: RemoteFailurePolicy,
    pub trusted_shops_path: PathBuf,
    pub default_location: Coordinate,
    pub geolocation_timeout_secs: u64,
    pub advisory_base_url: String,
    pub advisory_timeout_secs: u64,
    pub default_district: String,
    pub inventory_dir: PathBuf,
    pub storage_quota_bytes: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "locationiq_api_key",
                &self.locationiq_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("geocoder_base_url", &self.geocoder_base_url)
            .field("geocoder_timeout_secs", &self.geocoder_timeout_secs)
            .field("geocoder_result_limit", &self.geocoder_result_limit)
            .field("remote_failure_policy", &self.remote_failure_policy)
            .field("trusted_shops_path", &self.trusted_shops_path)
            .field("default_location", &self.default_location)
            .field("geolocation_timeout_secs", &self.geolocation_timeout_secs)
            .field("advisory_base_url", &self.advisory_base_url)
            .field("advisory_timeout_secs", &self.advisory_timeout_secs)
            .field("default_district", &self.default_district)
            .field("inventory_dir", &self.inventory_dir)
            .field("storage_quota_bytes", &self.storage_quota_bytes)
            .finish()
    }
}
