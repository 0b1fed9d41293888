use thiserror::Error;

/// Errors from the advisory backend client.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The advisory endpoint answered with a non-2xx status.
    #[error("advisory backend offline (HTTP {status})")]
    BackendOffline { status: u16 },

    /// The chat endpoint rejected the request; carries the backend's `detail`.
    #[error("{0}")]
    Backend(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid advisory base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
