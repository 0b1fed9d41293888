//! Shop search orchestration.
//!
//! 1. Query the geocoder, biased to a ±0.2° box around the center if known.
//! 2. Normalize places and keep agriculture-related ones.
//! 3. Collapse records sharing coordinates to 5 decimal places.
//! 4. Merge behind the trusted list, dropping remote records within 50 m of
//!    an accepted one.
//! 5. Rank by distance to the center and keep the nearest 60.
//!
//! Under [`RemoteFailurePolicy::UseFallbackOnly`] a geocoder failure is
//! logged and the search continues with trusted shops only, shown around the
//! default location.

use agridash_core::{AppConfig, Coordinate, RemoteFailurePolicy, TrustedShopsFile};

use crate::client::{PlaceSearch, SearchRequest};
use crate::dedupe::{dedupe_by_rounded_coords, merge_with_trusted, rank_by_distance};
use crate::dedupe::{MAX_RESULTS, MERGE_RADIUS_M};
use crate::error::ShopsError;
use crate::filter::is_agri_shop;
use crate::normalize::normalize_place;
use crate::types::{MapView, RawPlace, RemoteStatus, SearchOutcome, ShopRecord};

/// Query used when the caller submits a blank search.
pub const DEFAULT_QUERY: &str = "agro shop";
/// Half-width of the geocoder bounding box, in degrees.
pub const VIEWBOX_HALF_WIDTH_DEG: f64 = 0.2;
pub const DEFAULT_RESULT_LIMIT: u32 = 30;
/// Zoom for a normal result set.
pub const RESULT_ZOOM: u8 = 13;
/// Wider zoom used when falling back to the default location.
pub const FALLBACK_ZOOM: u8 = 11;

/// Static inputs of a [`ShopSearchPipeline`].
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Always merged first; never deduplicated against each other.
    pub trusted: Vec<ShopRecord>,
    pub default_location: Coordinate,
    /// Human-readable name of the default location, for notices.
    pub default_location_label: String,
    pub failure_policy: RemoteFailurePolicy,
    pub default_query: String,
    pub result_limit: u32,
    pub viewbox_half_width_deg: f64,
}

impl PipelineSettings {
    #[must_use]
    pub fn new(trusted: Vec<ShopRecord>, default_location: Coordinate) -> Self {
        Self {
            trusted,
            default_location,
            default_location_label: "the default area".to_string(),
            failure_policy: RemoteFailurePolicy::default(),
            default_query: DEFAULT_QUERY.to_string(),
            result_limit: DEFAULT_RESULT_LIMIT,
            viewbox_half_width_deg: VIEWBOX_HALF_WIDTH_DEG,
        }
    }

    /// Settings from application config and a loaded trusted-shop file.
    #[must_use]
    pub fn from_config(config: &AppConfig, trusted: &TrustedShopsFile) -> Self {
        let trusted = trusted.shops.iter().map(ShopRecord::from_trusted).collect();
        Self {
            default_location_label: config.default_district.clone(),
            failure_policy: config.remote_failure_policy,
            result_limit: config.geocoder_result_limit,
            ..Self::new(trusted, config.default_location)
        }
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: RemoteFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    #[must_use]
    pub fn with_default_location_label(mut self, label: &str) -> Self {
        self.default_location_label = label.to_string();
        self
    }

    fn fallback_view(&self) -> MapView {
        MapView {
            center: self.default_location,
            zoom: FALLBACK_ZOOM,
        }
    }
}

/// Searches for agricultural shops and merges them with the trusted list.
///
/// Holds no per-search state; each call produces a fresh [`SearchOutcome`].
pub struct ShopSearchPipeline<S> {
    search: S,
    settings: PipelineSettings,
}

impl<S: PlaceSearch> ShopSearchPipeline<S> {
    pub fn new(search: S, settings: PipelineSettings) -> Self {
        Self { search, settings }
    }

    #[must_use]
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// The geocoder this pipeline queries.
    #[must_use]
    pub fn search_backend(&self) -> &S {
        &self.search
    }

    /// Runs one search.
    ///
    /// A blank `query` is replaced by the default term. `center` biases the
    /// geocoder and is the origin for `distance_meters`.
    ///
    /// # Errors
    ///
    /// Only under [`RemoteFailurePolicy::Propagate`]: returns the geocoder's
    /// [`ShopsError`]. The default policy never errors.
    pub async fn search(
        &self,
        query: &str,
        center: Option<Coordinate>,
    ) -> Result<SearchOutcome, ShopsError> {
        let request = self.build_request(query, center);

        let (remote, status) = match self.search.search_places(&request).await {
            Ok(places) => {
                let returned = places.len();
                let accepted = select_agri_shops(places);
                let status = RemoteStatus::Ok {
                    returned,
                    accepted: accepted.len(),
                };
                (accepted, status)
            }
            Err(err) => match self.settings.failure_policy {
                RemoteFailurePolicy::Propagate => return Err(err),
                RemoteFailurePolicy::UseFallbackOnly => {
                    tracing::warn!(
                        query = %request.query,
                        error = %err,
                        "geocoder unavailable; showing trusted shops only"
                    );
                    (
                        Vec::new(),
                        RemoteStatus::Unavailable {
                            reason: err.to_string(),
                        },
                    )
                }
            },
        };

        let merged = merge_with_trusted(&self.settings.trusted, remote, MERGE_RADIUS_M);
        let shops = rank_by_distance(merged, center, MAX_RESULTS);

        let outcome = if matches!(status, RemoteStatus::Unavailable { .. }) {
            SearchOutcome {
                shops,
                view: self.settings.fallback_view(),
                remote: status,
            }
        } else if let Some(nearest) = shops.first() {
            let view = MapView {
                center: center.unwrap_or_else(|| nearest.coordinate()),
                zoom: RESULT_ZOOM,
            };
            SearchOutcome {
                shops,
                view,
                remote: status,
            }
        } else {
            SearchOutcome {
                shops: self.settings.trusted.clone(),
                view: self.settings.fallback_view(),
                remote: status,
            }
        };

        tracing::info!(
            query = %request.query,
            results = outcome.shops.len(),
            trusted = outcome.shops.iter().filter(|s| s.is_trusted).count(),
            "shop search complete"
        );
        Ok(outcome)
    }

    fn build_request(&self, query: &str, center: Option<Coordinate>) -> SearchRequest {
        let trimmed = query.trim();
        let query = if trimmed.is_empty() {
            self.settings.default_query.clone()
        } else {
            trimmed.to_string()
        };
        SearchRequest {
            query,
            viewbox: center.map(|c| c.bounding_box(self.settings.viewbox_half_width_deg)),
            limit: self.settings.result_limit,
        }
    }
}

/// Normalize, keyword-filter and coordinate-dedupe raw geocoder places.
#[must_use]
pub fn select_agri_shops(places: Vec<RawPlace>) -> Vec<ShopRecord> {
    let candidates = places
        .iter()
        .filter_map(normalize_place)
        .filter(is_agri_shop)
        .collect();
    dedupe_by_rounded_coords(candidates)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
