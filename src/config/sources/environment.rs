//! Environment variable source: POSTMAN_SYNC__ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `POSTMAN_SYNC__POSTMAN__BASE_URL` maps to `postman.base_url`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("POSTMAN_SYNC")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
