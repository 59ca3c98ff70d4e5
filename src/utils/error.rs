use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Product {product_id} not found in catalog")]
    ProductNotFoundError { product_id: u64 },

    #[error("Product {product_id} out of stock: requested {requested}, available {available}")]
    OutOfStockError {
        product_id: u64,
        requested: i64,
        available: u32,
    },

    #[error("Product {product_id} is not in the cart")]
    NotInCartError { product_id: u64 },

    #[error("Invalid amount {amount} for product {product_id}")]
    InvalidAmountError { product_id: u64, amount: i64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, CartError>;

/// Failure taxonomy exposed to programmatic callers of the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CatalogLookup,
    OutOfStock,
    NotInCart,
    InvalidAmount,
    Persistence,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Validation,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::ApiError(_)
            | CartError::CatalogError { .. }
            | CartError::ProductNotFoundError { .. } => ErrorKind::CatalogLookup,
            CartError::OutOfStockError { .. } => ErrorKind::OutOfStock,
            CartError::NotInCartError { .. } => ErrorKind::NotInCart,
            CartError::InvalidAmountError { .. } => ErrorKind::InvalidAmount,
            CartError::IoError(_) | CartError::SerializationError(_) => ErrorKind::Persistence,
            CartError::ConfigError { .. }
            | CartError::ConfigValidationError { .. }
            | CartError::InvalidConfigValueError { .. } => ErrorKind::Configuration,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.kind() {
            ErrorKind::CatalogLookup => ErrorCategory::Network,
            ErrorKind::OutOfStock | ErrorKind::NotInCart | ErrorKind::InvalidAmount => {
                ErrorCategory::Validation
            }
            ErrorKind::Persistence => ErrorCategory::Storage,
            ErrorKind::Configuration => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // the cart is left untouched, the user just picks something else
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::ApiError(_) | CartError::CatalogError { .. } => {
                "Could not reach the product catalog".to_string()
            }
            CartError::ProductNotFoundError { product_id } => {
                format!("Product {} does not exist", product_id)
            }
            CartError::OutOfStockError { .. } => "Requested quantity is out of stock".to_string(),
            CartError::NotInCartError { product_id } => {
                format!("Product {} is not in the cart", product_id)
            }
            CartError::InvalidAmountError { .. } => {
                "Product amount must be at least 1".to_string()
            }
            CartError::IoError(_) | CartError::SerializationError(_) => {
                "Could not save the cart".to_string()
            }
            _ => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::CatalogLookup => "Check that the catalog API is running and the product id is correct",
            ErrorKind::OutOfStock => "Choose a smaller quantity",
            ErrorKind::NotInCart => "Add the product to the cart first",
            ErrorKind::InvalidAmount => "Use an amount of 1 or more, or remove the product instead",
            ErrorKind::Persistence => "Check that the storage directory is writable",
            ErrorKind::Configuration => "Review the command line flags or the TOML config file",
        }
    }
}
