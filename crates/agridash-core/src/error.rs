use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read trusted shops file {path}: {source}")]
    TrustedShopsIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse trusted shops file: {0}")]
    TrustedShopsParse(#[from] serde_yaml::Error),

    #[error("trusted shops validation failed: {0}")]
    Validation(String),
}
