pub mod cart_store;

pub use crate::domain::model::{
    Cart, CartLine, Notification, NotificationLevel, Product, StockInfo,
};
pub use crate::domain::ports::{CatalogService, ConfigProvider, Notifier, PersistenceStore};
pub use crate::utils::error::Result;
