use crate::core::cart_store::DEFAULT_STORAGE_KEY;
use crate::core::ConfigProvider;
use crate::utils::error::{CartError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

fn default_storage_path() -> String {
    "./.rocket-cart".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl TomlConfig {
    /// Loads the config from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CartError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CartError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CartError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.catalog.endpoint
    }

    fn storage_path(&self) -> &str {
        &self.storage.path
    }

    fn storage_key(&self) -> &str {
        &self.storage.key
    }

    fn request_timeout(&self) -> u64 {
        self.catalog.timeout_seconds.unwrap_or(10)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("catalog.endpoint", &self.catalog.endpoint)?;
        validation::validate_path("storage.path", &self.storage.path)?;
        validation::validate_non_empty_string("storage.key", &self.storage.key)?;
        validation::validate_range("catalog.timeout_seconds", self.request_timeout(), 0, 300)?;
        Ok(())
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
[catalog]
endpoint = "https://api.example.com/"
timeout_seconds = 3

[storage]
path = "/var/lib/cart"
key = "shop:cart"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_endpoint(), "https://api.example.com/");
        assert_eq!(config.request_timeout(), 3);
        assert_eq!(config.storage_path(), "/var/lib/cart");
        assert_eq!(config.storage_key(), "shop:cart");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_storage_defaults() {
        let config = TomlConfig::from_toml_str("[catalog]\nendpoint = \"http://localhost:3333\"\n").unwrap();

        assert_eq!(config.storage_key(), "@RocketShoes:cart");
        assert_eq!(config.storage_path(), "./.rocket-cart");
        assert_eq!(config.request_timeout(), 10);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ROCKET_CART_TEST_ENDPOINT", "https://catalog.test");

        let config = TomlConfig::from_toml_str(
            "[catalog]\nendpoint = \"${ROCKET_CART_TEST_ENDPOINT}\"\n",
        )
        .unwrap();
        assert_eq!(config.catalog.endpoint, "https://catalog.test");

        std::env::remove_var("ROCKET_CART_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[catalog]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_catalog_section_fails() {
        assert!(TomlConfig::from_toml_str("[storage]\nkey = \"x\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[catalog]\nendpoint = \"http://127.0.0.1:3333\"").unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api_endpoint(), "http://127.0.0.1:3333");
    }
}
