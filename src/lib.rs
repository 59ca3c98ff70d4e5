pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};
pub use crate::config::TomlConfig;

pub use crate::adapters::http::ApiCatalog;
pub use crate::adapters::notify::{ChannelNotifier, TracingNotifier};
pub use crate::adapters::storage::{LocalStorage, MemoryStorage};
pub use crate::core::cart_store::{CartStore, UpdateProductAmount, DEFAULT_STORAGE_KEY};
pub use crate::domain::model::{Cart, CartLine, Notification, NotificationLevel, Product, StockInfo};
pub use crate::utils::error::{CartError, ErrorKind, Result};
