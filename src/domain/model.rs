use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Catalog representation of a product. Everything besides `id` is display
/// data: it is kept verbatim and only read through the accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Product {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    pub fn price(&self) -> Option<f64> {
        self.fields.get("price").and_then(Value::as_f64)
    }

    pub fn image(&self) -> Option<&str> {
        self.fields.get("image").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    pub id: u64,
    pub amount: u32,
}

/// A product held in the cart. Serialized flat: `{"id":1,...,"amount":2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl CartLine {
    pub fn new(mut product: Product, amount: u32) -> Self {
        // the line's own amount wins over anything the catalog sent
        product.fields.remove("amount");
        Self { product, amount }
    }

    pub fn id(&self) -> u64 {
        self.product.id
    }

    pub fn subtotal(&self) -> f64 {
        self.product.price().unwrap_or(0.0) * f64::from(self.amount)
    }
}

/// Ordered cart lines, at most one per product id.
///
/// The mutating helpers return a new cart so the store can persist the next
/// state before committing it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from lines, keeping the first line seen for each id.
    /// Lines with a zero amount are dropped.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.amount < 1 {
                tracing::warn!("Dropping product {} with amount {}", line.id(), line.amount);
            } else if cart.contains(line.id()) {
                tracing::warn!("Dropping duplicate line for product {}", line.id());
            } else {
                cart.lines.push(line);
            }
        }
        cart
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: u64) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == product_id)
    }

    pub fn contains(&self, product_id: u64) -> bool {
        self.line(product_id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line amounts.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.amount)).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Appends `line`, or returns `None` if its product is already present.
    pub fn with_line(&self, line: CartLine) -> Option<Cart> {
        if self.contains(line.id()) {
            return None;
        }
        let mut next = self.clone();
        next.lines.push(line);
        Some(next)
    }

    /// Sets the amount of an existing line in place, keeping its position.
    pub fn with_amount(&self, product_id: u64, amount: u32) -> Option<Cart> {
        let index = self.lines.iter().position(|line| line.id() == product_id)?;
        let mut next = self.clone();
        next.lines[index].amount = amount;
        Some(next)
    }

    pub fn without(&self, product_id: u64) -> Option<Cart> {
        if !self.contains(product_id) {
            return None;
        }
        let lines = self
            .lines
            .iter()
            .filter(|line| line.id() != product_id)
            .cloned()
            .collect();
        Some(Cart { lines })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}
