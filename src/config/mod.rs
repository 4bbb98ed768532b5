#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CartCommand, CliConfig};
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_range, validate_url};

pub const DEFAULT_API_ENDPOINT: &str = "http://localhost:3333";
pub const DEFAULT_STORAGE_PATH: &str = "./.cart";

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_url("api_endpoint", config.api_endpoint())?;
    validate_path("storage_path", config.storage_path())?;

    let policy = config.request_policy();
    validate_positive_number("timeout_seconds", policy.timeout.as_secs(), 1)?;
    validate_range("retry_attempts", policy.retry_attempts, 0, 10)?;

    Ok(())
}
