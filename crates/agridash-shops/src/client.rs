//! HTTP client for the LocationIQ text-search endpoint.
//!
//! Wraps `reqwest` with API key handling, viewbox biasing and typed decoding
//! of the place array. Any non-2xx status (including LocationIQ's 404 for
//! "no results") is surfaced as [`ShopsError::UnexpectedStatus`].

use std::time::Duration;

use agridash_core::BoundingBox;
use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::ShopsError;
use crate::types::RawPlace;

const DEFAULT_BASE_URL: &str = "https://us1.locationiq.com/v1/";

/// One text search against the geocoder.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    /// Restricts matches to this box (`bounded=1`) when present.
    pub viewbox: Option<BoundingBox>,
    pub limit: u32,
}

/// A remote place search backend.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Runs one text search and returns the raw place records.
    ///
    /// # Errors
    ///
    /// Returns [`ShopsError`] on transport failure, non-2xx status, or a
    /// body that is not JSON.
    async fn search_places(&self, request: &SearchRequest) -> Result<Vec<RawPlace>, ShopsError>;
}

/// Client for the LocationIQ `search` endpoint.
///
/// Use [`LocationIqClient::new`] for production or
/// [`LocationIqClient::with_base_url`] to point at a mock server in tests.
pub struct LocationIqClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl LocationIqClient {
    /// Creates a client pointed at the public LocationIQ API.
    ///
    /// # Errors
    ///
    /// Returns [`ShopsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, ShopsError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ShopsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ShopsError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ShopsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("agridash/0.1 (shop-finder)")
            .build()?;

        // Exactly one trailing slash, so joining "search" appends a segment
        // instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ShopsError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Builds the full search URL with percent-encoded query parameters.
    fn build_search_url(&self, request: &SearchRequest) -> Result<Url, ShopsError> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|e| ShopsError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            pairs.append_pair("q", &request.query);
            pairs.append_pair("format", "json");
            pairs.append_pair("limit", &request.limit.to_string());
            if let Some(viewbox) = &request.viewbox {
                pairs.append_pair("viewbox", &viewbox.to_viewbox());
                pairs.append_pair("bounded", "1");
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl PlaceSearch for LocationIqClient {
    async fn search_places(&self, request: &SearchRequest) -> Result<Vec<RawPlace>, ShopsError> {
        let url = self.build_search_url(request)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShopsError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let places = decode_places(&body, &request.query)?;

        tracing::debug!(
            query = %request.query,
            bounded = request.viewbox.is_some(),
            count = places.len(),
            "geocoder search returned places"
        );
        Ok(places)
    }
}

/// Decodes a search response body.
///
/// Only text that is not JSON at all is an error. A JSON value other than an
/// array means "no places", and array elements that are not place objects are
/// skipped so the remaining places survive.
fn decode_places(body: &str, query: &str) -> Result<Vec<RawPlace>, ShopsError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ShopsError::Deserialize {
            context: format!("search(q={query})"),
            source: e,
        })?;

    let serde_json::Value::Array(elements) = value else {
        tracing::debug!(query, "geocoder response is not an array; treating as no places");
        return Ok(Vec::new());
    };

    let places = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| {
            serde_json::from_value::<RawPlace>(element)
                .map_err(|e| {
                    tracing::debug!(query, index, error = %e, "skipping undecodable place");
                })
                .ok()
        })
        .collect();
    Ok(places)
}
