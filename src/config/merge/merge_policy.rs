//! Base builder shared by every load path.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Start a builder. Field defaults live on the serde structs, so an empty
/// source set deserializes to `SyncConfig::default()`.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder().set_default("postman.base_url", crate::config::DEFAULT_POSTMAN_BASE_URL)
}
