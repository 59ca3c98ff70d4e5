use crate::core::cart_store::DEFAULT_STORAGE_KEY;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "rocket-cart")]
#[command(about = "Shopping cart kept in local storage and checked against the store's stock API")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:3333")]
    pub api_endpoint: String,

    #[arg(long, default_value = "./.rocket-cart")]
    pub storage_path: String,

    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    pub storage_key: String,

    #[arg(long, default_value = "10", help = "Request timeout in seconds, 0 disables it")]
    pub request_timeout: u64,

    #[arg(long, help = "TOML config file; replaces the catalog and storage flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum Command {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add { product_id: u64 },
    /// Remove a product line entirely
    Remove { product_id: u64 },
    /// Set the amount of a product already in the cart
    Update {
        product_id: u64,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn storage_path(&self) -> &str {
        &self.storage_path
    }

    fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn request_timeout(&self) -> u64 {
        self.request_timeout
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_path("storage_path", &self.storage_path)?;
        validation::validate_non_empty_string("storage_key", &self.storage_key)?;
        validation::validate_range("request_timeout", self.request_timeout, 0, 300)?;
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }
        Ok(())
    }
}
