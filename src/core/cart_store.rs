use crate::core::{Cart, CartLine, CatalogService, Notification, Notifier, PersistenceStore};
use crate::utils::error::{CartError, ErrorKind, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductAmount {
    pub product_id: u64,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Remove,
    Update,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::Add => "add_product",
            Operation::Remove => "remove_product",
            Operation::Update => "update_product_amount",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            Operation::Add => "Product added to cart",
            Operation::Remove => "Product removed from cart",
            Operation::Update => "Product amount updated",
        }
    }

    fn failure_message(self, error: &CartError) -> String {
        match error.kind() {
            ErrorKind::OutOfStock | ErrorKind::InvalidAmount => error.user_friendly_message(),
            _ => match self {
                Operation::Add => "Error adding product".to_string(),
                Operation::Remove => "Error removing product".to_string(),
                Operation::Update => "Error changing product amount".to_string(),
            },
        }
    }
}

/// In-memory cart mirrored into a [`PersistenceStore`] after every
/// successful mutation.
///
/// Each mutation holds the cart lock from the first read to the final write,
/// so concurrent calls on the same store are applied one after the other.
pub struct CartStore<C: CatalogService, S: PersistenceStore, N: Notifier> {
    catalog: C,
    storage: S,
    notifier: N,
    key: String,
    cart: Mutex<Cart>,
}

impl<C: CatalogService, S: PersistenceStore, N: Notifier> CartStore<C, S, N> {
    /// Reads the persisted cart once. A value that cannot be parsed is
    /// logged and replaced by an empty cart.
    pub async fn load(catalog: C, storage: S, notifier: N, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let cart = match storage.get_item(&key).await? {
            Some(raw) => match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => {
                    let cart = Cart::from_lines(lines);
                    tracing::debug!("Restored cart with {} products from '{}'", cart.len(), key);
                    cart
                }
                Err(e) => {
                    tracing::warn!("Stored cart under '{}' is unreadable, starting empty: {}", key, e);
                    Cart::new()
                }
            },
            None => Cart::new(),
        };

        Ok(Self {
            catalog,
            storage,
            notifier,
            key,
            cart: Mutex::new(cart),
        })
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub async fn cart(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    pub async fn add_product(&self, product_id: u64) -> Result<Cart> {
        let result = self.try_add(product_id).await;
        self.report(Operation::Add, product_id, result)
    }

    pub async fn remove_product(&self, product_id: u64) -> Result<Cart> {
        let result = self.try_remove(product_id).await;
        self.report(Operation::Remove, product_id, result)
    }

    pub async fn update_product_amount(&self, request: UpdateProductAmount) -> Result<Cart> {
        let result = self.try_update(request).await;
        self.report(Operation::Update, request.product_id, result)
    }

    async fn try_add(&self, product_id: u64) -> Result<Cart> {
        let mut cart = self.cart.lock().await;

        let (product, stock) = tokio::join!(
            self.catalog.product(product_id),
            self.catalog.stock(product_id)
        );
        let product = product?.ok_or(CartError::ProductNotFoundError { product_id })?;
        let stock = stock?.ok_or(CartError::ProductNotFoundError { product_id })?;

        let next = match cart.line(product_id) {
            None => {
                if stock.amount == 0 {
                    return Err(CartError::OutOfStockError {
                        product_id,
                        requested: 1,
                        available: stock.amount,
                    });
                }
                cart.with_line(CartLine::new(product, 1))
            }
            Some(line) => {
                if stock.amount <= line.amount {
                    return Err(CartError::OutOfStockError {
                        product_id,
                        requested: i64::from(line.amount) + 1,
                        available: stock.amount,
                    });
                }
                cart.with_amount(product_id, line.amount + 1)
            }
        };
        // both branches were checked against the locked cart above
        let next = next.ok_or(CartError::NotInCartError { product_id })?;

        self.commit(&mut cart, next).await
    }

    async fn try_remove(&self, product_id: u64) -> Result<Cart> {
        let mut cart = self.cart.lock().await;
        let next = cart
            .without(product_id)
            .ok_or(CartError::NotInCartError { product_id })?;
        self.commit(&mut cart, next).await
    }

    async fn try_update(&self, request: UpdateProductAmount) -> Result<Cart> {
        let UpdateProductAmount { product_id, amount } = request;
        if amount < 1 {
            return Err(CartError::InvalidAmountError { product_id, amount });
        }

        let mut cart = self.cart.lock().await;

        let stock = self
            .catalog
            .stock(product_id)
            .await?
            .ok_or(CartError::ProductNotFoundError { product_id })?;
        if amount > i64::from(stock.amount) {
            return Err(CartError::OutOfStockError {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        // amount <= stock.amount, which is a u32
        let amount = u32::try_from(amount).map_err(|_| CartError::InvalidAmountError { product_id, amount })?;
        let next = cart
            .with_amount(product_id, amount)
            .ok_or(CartError::NotInCartError { product_id })?;

        self.commit(&mut cart, next).await
    }

    /// Persists `next` and only then makes it the current cart.
    async fn commit(&self, current: &mut Cart, next: Cart) -> Result<Cart> {
        let serialized = serde_json::to_string(&next)?;
        self.storage.set_item(&self.key, &serialized).await?;
        *current = next;
        Ok(current.clone())
    }

    fn report(&self, operation: Operation, product_id: u64, result: Result<Cart>) -> Result<Cart> {
        match &result {
            Ok(cart) => {
                tracing::info!(
                    "{} succeeded for product {} ({} products in cart)",
                    operation.name(),
                    product_id,
                    cart.len()
                );
                self.notifier
                    .notify(Notification::success(operation.success_message()));
            }
            Err(e) => {
                tracing::warn!(
                    "{} failed for product {} (kind: {:?}): {}",
                    operation.name(),
                    product_id,
                    e.kind(),
                    e
                );
                self.notifier
                    .notify(Notification::error(operation.failure_message(e)));
            }
        }
        result
    }
}
