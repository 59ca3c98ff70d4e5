use crate::domain::model::{Notification, Product, StockInfo};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only product and stock lookups. `Ok(None)` means the catalog has no
/// such resource.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn product(&self, product_id: u64) -> Result<Option<Product>>;
    async fn stock(&self, product_id: u64) -> Result<Option<StockInfo>>;
}

/// Opaque key-value string storage surviving across sessions.
pub trait PersistenceStore: Send + Sync {
    fn get_item(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Fire-and-forget sink for user-facing messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn storage_key(&self) -> &str;
    /// Seconds; zero disables the timeout.
    fn request_timeout(&self) -> u64;
}
