//! Device-location-triggered shop search.

use std::time::Duration;

use agridash_core::Coordinate;
use async_trait::async_trait;
use thiserror::Error;

use crate::client::PlaceSearch;
use crate::error::ShopsError;
use crate::pipeline::ShopSearchPipeline;
use crate::types::SearchOutcome;

/// Query sent when a device fix is available.
pub const NEAR_ME_QUERY: &str = "Agri shop near me";

/// Why a location fix could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("timed out waiting for a location fix")]
    Timeout,

    #[error("geolocation is not supported on this device")]
    Unsupported,

    #[error("location unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocateOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(15),
        }
    }
}

impl LocateOptions {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A source of single device location fixes.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Acquires one fix.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError`] when no fix can be produced.
    async fn locate(&self, options: LocateOptions) -> Result<Coordinate, LocationError>;
}

/// Always reports the same fix. Used for `--lat/--lon` on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn locate(&self, _options: LocateOptions) -> Result<Coordinate, LocationError> {
        if self.0.is_valid() {
            Ok(self.0)
        } else {
            Err(LocationError::Unavailable(format!(
                "invalid fix {},{}",
                self.0.lat, self.0.lon
            )))
        }
    }
}

/// A device without geolocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn locate(&self, _options: LocateOptions) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// Result of [`search_near_me`].
#[derive(Debug, Clone, PartialEq)]
pub struct NearMeOutcome {
    pub outcome: SearchOutcome,
    /// Transient message for the user when no fix was obtained.
    pub notice: Option<String>,
    pub located: Option<Coordinate>,
}

/// Runs a search centered on the device's position.
///
/// Without a fix the search still runs: `fallback_query` around the
/// pipeline's default location, plus a notice naming that location.
///
/// # Errors
///
/// Only what [`ShopSearchPipeline::search`] returns.
pub async fn search_near_me<S, L>(
    pipeline: &ShopSearchPipeline<S>,
    provider: &L,
    options: LocateOptions,
    fallback_query: &str,
) -> Result<NearMeOutcome, ShopsError>
where
    S: PlaceSearch,
    L: LocationProvider + ?Sized,
{
    let fix = match tokio::time::timeout(options.timeout, provider.locate(options)).await {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout),
    };

    match fix {
        Ok(center) => {
            tracing::debug!(lat = center.lat, lon = center.lon, "device location acquired");
            let outcome = pipeline.search(NEAR_ME_QUERY, Some(center)).await?;
            Ok(NearMeOutcome {
                outcome,
                notice: None,
                located: Some(center),
            })
        }
        Err(err) => {
            let settings = pipeline.settings();
            tracing::warn!(error = %err, "geolocation failed; using default location");
            let outcome = pipeline
                .search(fallback_query, Some(settings.default_location))
                .await?;
            Ok(NearMeOutcome {
                outcome,
                notice: Some(format!(
                    "Could not get GPS. Showing default shops in {}.",
                    settings.default_location_label
                )),
                located: None,
            })
        }
    }
}
