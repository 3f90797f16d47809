//! Error types shared by every layer of the sync tool.

use thiserror::Error;

/// Top-level error returned by library operations.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Postman API returned {status}: {body}")]
    PostmanApi { status: u16, body: String },

    #[error("Spec download from {url} returned {status}: {body}")]
    SpecDownload {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Invalid spec document: {0}")]
    InvalidSpec(String),

    #[error("Invalid collection document: {0}")]
    InvalidCollection(String),

    #[error("No collection UID in Postman response")]
    MissingCollectionUid,

    #[error("No Postman API key found (set POSTMAN_API_KEY or add one to the key file)")]
    MissingApiKey,

    #[error("Link already registered: {0}")]
    LinkAlreadyRegistered(String),
}

impl ApiError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        ApiError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
