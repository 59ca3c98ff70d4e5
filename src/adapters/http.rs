use crate::core::{CatalogService, ConfigProvider, Product, StockInfo};
use crate::utils::error::{CartError, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Catalog client for the storefront API (`GET products/{id}`,
/// `GET stock/{id}`).
#[derive(Debug, Clone)]
pub struct ApiCatalog {
    client: Client,
    base_url: Url,
}

impl ApiCatalog {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let mut base_url = Url::parse(endpoint).map_err(|e| CartError::InvalidConfigValueError {
            field: "api_endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        // relative joins drop the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(config.api_endpoint(), config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn fetch<T: DeserializeOwned + Send>(&self, path: &str) -> Result<Option<T>> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| CartError::CatalogError {
                message: format!("Cannot build URL for '{}': {}", path, e),
            })?;

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CartError::CatalogError {
                message: format!("GET {} returned {}", url, status),
            });
        }

        let body = response.text().await?;
        let body = body.trim();
        if body.is_empty() || body == "null" || body == "{}" {
            return Ok(None);
        }

        serde_json::from_str(body)
            .map(Some)
            .map_err(|e| CartError::CatalogError {
                message: format!("Unexpected response from {}: {}", url, e),
            })
    }
}

#[async_trait::async_trait]
impl CatalogService for ApiCatalog {
    async fn product(&self, product_id: u64) -> Result<Option<Product>> {
        self.fetch(&format!("products/{}", product_id)).await
    }

    async fn stock(&self, product_id: u64) -> Result<Option<StockInfo>> {
        self.fetch(&format!("stock/{}", product_id)).await
    }
}
