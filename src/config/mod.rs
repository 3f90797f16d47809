//! Configuration
//!
//! Layered settings for the sync tool: built-in defaults, a global file under
//! `$XDG_CONFIG_HOME/postman-sync/`, a `postman-sync.toml` in the workspace,
//! then `POSTMAN_SYNC__*` environment variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod workspace;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use workspace::storage_paths::{StorageConfig, StoragePaths};

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default Postman API origin
pub const DEFAULT_POSTMAN_BASE_URL: &str = "https://api.getpostman.com";

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub postman: PostmanConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Postman API access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanConfig {
    /// API origin, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; POSTMAN_API_KEY takes precedence when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// File the API key is read from and saved to (relative to workspace root)
    #[serde(default = "default_api_key_file")]
    pub api_key_file: PathBuf,
}

fn default_base_url() -> String {
    DEFAULT_POSTMAN_BASE_URL.to_string()
}

fn default_api_key_file() -> PathBuf {
    PathBuf::from("api_key.txt")
}

impl Default for PostmanConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_key_file: default_api_key_file(),
        }
    }
}

impl PostmanConfig {
    pub fn validate(&self) -> Result<(), String> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(format!("Invalid Postman base URL: {}", self.base_url));
        }
        if url.ends_with('/') {
            return Err(format!(
                "Postman base URL must not end with '/': {}",
                self.base_url
            ));
        }
        Ok(())
    }
}

impl SyncConfig {
    /// Copy with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.postman.api_key.is_some() {
            config.postman.api_key = Some("********".to_string());
        }
        config
    }
}
