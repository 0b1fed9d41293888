use thiserror::Error;

/// Errors from the geocoder client and the shop search pipeline.
#[derive(Debug, Error)]
pub enum ShopsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from geocoder")]
    UnexpectedStatus { status: u16 },

    /// The response body was not JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid geocoder base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
