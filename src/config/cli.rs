use crate::config::{validate_provider, TomlConfig, DEFAULT_API_ENDPOINT, DEFAULT_STORAGE_PATH};
use crate::core::{ConfigProvider, RequestPolicy};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "cart-sync")]
#[command(about = "Stock-aware shopping cart with local persistence")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = DEFAULT_STORAGE_PATH)]
    pub storage_path: String,

    #[arg(long, default_value = "10")]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "2")]
    pub retry_attempts: u32,

    #[arg(long, default_value = "200")]
    pub retry_delay_ms: u64,

    #[arg(long, help = "TOML file whose values override the flags above")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CartCommand {
    /// Add one unit of a product
    Add { product_id: u64 },
    /// Remove a product from the cart
    Remove { product_id: u64 },
    /// Set a product's quantity
    Update {
        product_id: u64,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Print the stored cart
    Show,
}

impl CliConfig {
    /// Loads `--config` if given and applies it over the flag values.
    pub fn resolve(mut self) -> Result<Self> {
        if let Some(path) = &self.config {
            let file = TomlConfig::from_file(path)?;
            self.apply(&file);
        }
        Ok(self)
    }

    pub fn apply(&mut self, file: &TomlConfig) {
        self.api_endpoint = file.api.endpoint.clone();
        if let Some(storage) = &file.storage {
            self.storage_path = storage.path.clone();
        }
        if let Some(timeout) = file.api.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(attempts) = file.api.retry_attempts {
            self.retry_attempts = attempts;
        }
        if let Some(delay) = file.api.retry_delay_ms {
            self.retry_delay_ms = delay;
        }
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn storage_path(&self) -> &str {
        &self.storage_path
    }

    fn request_policy(&self) -> RequestPolicy {
        RequestPolicy {
            timeout: Duration::from_secs(self.timeout_seconds),
            retry_attempts: self.retry_attempts,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
