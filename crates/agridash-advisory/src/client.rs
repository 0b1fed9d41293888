//! HTTP client for the farm advisory backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::AdvisoryError;
use crate::types::{AdvisoryReport, ChatReply, ChatRequest, ErrorBody, EMPTY_REPLY_FALLBACK};

/// Anything that can answer a chat message.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends one chat turn and returns the reply text.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisoryError`] when the backend cannot be reached or
    /// rejects the request.
    async fn send_chat(&self, request: &ChatRequest) -> Result<String, AdvisoryError>;
}

/// Client for the `agri-advisory` and `chat` endpoints.
pub struct AdvisoryClient {
    client: Client,
    base_url: Url,
}

impl AdvisoryClient {
    /// # Errors
    ///
    /// Returns [`AdvisoryError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`AdvisoryError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, AdvisoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("agridash/0.1 (advisory)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| AdvisoryError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, name: &str) -> Result<Url, AdvisoryError> {
        self.base_url
            .join(name)
            .map_err(|e| AdvisoryError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Fetches the current sensor readings and advisory for `district`, or
    /// for the backend's default district when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisoryError::BackendOffline`] for any non-2xx status,
    /// [`AdvisoryError::Http`] on transport failure and
    /// [`AdvisoryError::Deserialize`] for an unexpected payload.
    pub async fn fetch_advisory(
        &self,
        district: Option<&str>,
    ) -> Result<AdvisoryReport, AdvisoryError> {
        let mut url = self.endpoint("agri-advisory")?;
        if let Some(district) = district.map(str::trim).filter(|d| !d.is_empty()) {
            url.query_pairs_mut().append_pair("district", district);
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), ?district, "advisory backend returned error status");
            return Err(AdvisoryError::BackendOffline {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let report: AdvisoryReport =
            serde_json::from_str(&body).map_err(|e| AdvisoryError::Deserialize {
                context: "agri-advisory".to_string(),
                source: e,
            })?;

        tracing::debug!(location = %report.location, "advisory fetched");
        Ok(report)
    }
}

#[async_trait]
impl ChatBackend for AdvisoryClient {
    /// Posts to `chat`. An empty or blank reply is replaced with
    /// [`EMPTY_REPLY_FALLBACK`].
    async fn send_chat(&self, request: &ChatRequest) -> Result<String, AdvisoryError> {
        let url = self.endpoint("chat")?;
        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail)
                .map(|d| match d {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .unwrap_or_else(|| "Server Error".to_string());
            return Err(AdvisoryError::Backend(detail));
        }

        let reply: ChatReply = serde_json::from_str(&body).map_err(|e| AdvisoryError::Deserialize {
            context: "chat".to_string(),
            source: e,
        })?;

        Ok(reply
            .reply
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_under_base_path() {
        let client = AdvisoryClient::new("http://localhost:8000/api", 5).unwrap();
        assert_eq!(
            client.endpoint("chat").unwrap().as_str(),
            "http://localhost:8000/api/chat"
        );
        assert_eq!(
            client.endpoint("agri-advisory").unwrap().as_str(),
            "http://localhost:8000/api/agri-advisory"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            AdvisoryClient::new("::nope", 5),
            Err(AdvisoryError::InvalidBaseUrl { .. })
        ));
    }
}
