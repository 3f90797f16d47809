//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::SyncConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from files and environment.
    pub fn load(workspace_root: &Path) -> Result<SyncConfig, ApiError> {
        let config = MergeService::load(workspace_root)?;
        Self::validated(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<SyncConfig, ApiError> {
        let config = MergeService::load_from_file(path)?;
        Self::validated(config)
    }

    /// Create default configuration.
    pub fn default() -> SyncConfig {
        SyncConfig::default()
    }

    fn validated(config: SyncConfig) -> Result<SyncConfig, ApiError> {
        config.postman.validate().map_err(ApiError::ConfigError)?;
        Ok(config)
    }
}
