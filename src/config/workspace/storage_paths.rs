//! StorageConfig and resolve_paths for the registry and scratch files.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_links_file() -> PathBuf {
    PathBuf::from("links.json")
}

fn default_scratch_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_new_file() -> PathBuf {
    PathBuf::from("new.json")
}

fn default_old_file() -> PathBuf {
    PathBuf::from("old.json")
}

fn default_updated_file() -> PathBuf {
    PathBuf::from("updated.json")
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Links registry (relative to workspace root)
    #[serde(default = "default_links_file")]
    pub links_file: PathBuf,

    /// Directory for the intermediate collection files (relative to workspace root)
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,

    #[serde(default = "default_new_file")]
    pub new_file: PathBuf,

    #[serde(default = "default_old_file")]
    pub old_file: PathBuf,

    #[serde(default = "default_updated_file")]
    pub updated_file: PathBuf,
}

/// Storage locations resolved against a workspace root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub links_file: PathBuf,
    pub new_file: PathBuf,
    pub old_file: PathBuf,
    pub updated_file: PathBuf,
}

impl StorageConfig {
    /// Resolve storage paths to actual filesystem locations.
    ///
    /// Absolute paths are kept as configured. Scratch file names are joined
    /// onto `scratch_dir`.
    pub fn resolve_paths(&self, workspace_root: &Path) -> Result<StoragePaths, ApiError> {
        let scratch = workspace_root.join(&self.scratch_dir);
        for (label, name) in [
            ("new_file", &self.new_file),
            ("old_file", &self.old_file),
            ("updated_file", &self.updated_file),
        ] {
            if name.as_os_str().is_empty() {
                return Err(ApiError::ConfigError(format!(
                    "storage.{} must not be empty",
                    label
                )));
            }
        }

        Ok(StoragePaths {
            links_file: workspace_root.join(&self.links_file),
            new_file: scratch.join(&self.new_file),
            old_file: scratch.join(&self.old_file),
            updated_file: scratch.join(&self.updated_file),
        })
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            links_file: default_links_file(),
            scratch_dir: default_scratch_dir(),
            new_file: default_new_file(),
            old_file: default_old_file(),
            updated_file: default_updated_file(),
        }
    }
}
