use crate::utils::error::{CartError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: String,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML after replacing `${VAR}` with environment values. Unset
    /// variables are left as written.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CartError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CartError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
endpoint = "https://shop.example.com"
timeout_seconds = 5
retry_attempts = 4
retry_delay_ms = 50

[storage]
path = "/var/lib/cart"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api.endpoint, "https://shop.example.com");
        assert_eq!(config.api.timeout_seconds, Some(5));
        assert_eq!(config.api.retry_attempts, Some(4));
        assert_eq!(config.api.retry_delay_ms, Some(50));
        assert_eq!(config.storage.unwrap().path, "/var/lib/cart");
    }

    #[test]
    fn test_optional_fields_may_be_omitted() {
        let config = TomlConfig::from_toml_str("[api]\nendpoint = \"http://localhost:3333\"\n")
            .unwrap();

        assert!(config.storage.is_none());
        assert!(config.api.timeout_seconds.is_none());
        assert!(config.api.retry_attempts.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CART_SYNC_TEST_ENDPOINT", "https://test.shop.com");

        let toml_content = r#"
[api]
endpoint = "${CART_SYNC_TEST_ENDPOINT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.endpoint, "https://test.shop.com");

        std::env::remove_var("CART_SYNC_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nendpoint = \"http://localhost:3333\"\n\n[storage]\npath = \"./data\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.storage.unwrap().path, "./data");
    }

    #[test]
    fn test_missing_api_section_is_error() {
        assert!(TomlConfig::from_toml_str("[storage]\npath = \"x\"\n").is_err());
    }
}
