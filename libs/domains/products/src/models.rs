use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Product identifier.
///
/// The SQL store hands out auto-increment integers, the in-memory store
/// random UUIDs. Serialized as a bare JSON number or string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ProductId {
    Serial(i64),
    Uuid(Uuid),
}

impl ProductId {
    pub fn new_uuid() -> Self {
        ProductId::Uuid(Uuid::new_v4())
    }

    pub fn as_serial(&self) -> Option<i64> {
        match self {
            ProductId::Serial(id) => Some(*id),
            ProductId::Uuid(_) => None,
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            ProductId::Uuid(id) => Some(*id),
            ProductId::Serial(_) => None,
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Serial(id) => write!(f, "{}", id),
            ProductId::Uuid(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidProductId(pub String);

impl fmt::Display for InvalidProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is neither an integer nor a UUID", self.0)
    }
}

impl std::error::Error for InvalidProductId {}

impl FromStr for ProductId {
    type Err = InvalidProductId;

    /// Integers first, then UUIDs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.parse::<i64>() {
            return Ok(ProductId::Serial(id));
        }
        Uuid::parse_str(s)
            .map(ProductId::Uuid)
            .map_err(|_| InvalidProductId(s.to_string()))
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId::Serial(id)
    }
}

impl From<Uuid> for ProductId {
    fn from(id: Uuid) -> Self {
        ProductId::Uuid(id)
    }
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    /// Rounded to 2 decimal places
    pub price: f64,
    pub category: Option<String>,
    pub stock_quantity: i32,
    pub sku: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a product with a fresh timestamp pair (`created_at == updated_at`).
    pub fn from_new(id: ProductId, input: NewProduct) -> Self {
        let now = timestamp_now();
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            stock_quantity: input.stock_quantity,
            sku: input.sku,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply supplied fields and advance `updated_at`.
    pub fn apply_changes(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(category) = changes.category {
            self.category = Some(category);
        }
        if let Some(stock_quantity) = changes.stock_quantity {
            self.stock_quantity = stock_quantity;
        }
        if let Some(sku) = changes.sku {
            self.sku = Some(sku);
        }
        self.updated_at = next_updated_at(self.updated_at);
    }
}

/// Validated input for creating a product
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub stock_quantity: i32,
    pub sku: Option<String>,
}

/// Validated partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock_quantity: Option<i32>,
    pub sku: Option<String>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Request body accepted by create and update (documentation only; bodies
/// are validated field by field from raw JSON)
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductPayload {
    #[schema(example = "Laptop", max_length = 100)]
    pub name: Option<String>,
    #[schema(example = "High-performance laptop for developers")]
    pub description: Option<String>,
    /// JSON number or numeric string
    #[schema(example = 999.99)]
    pub price: Option<f64>,
    #[schema(example = "Electronics", max_length = 50)]
    pub category: Option<String>,
    #[schema(example = 10, minimum = 0)]
    pub stock_quantity: Option<i32>,
    #[schema(example = "LAP-001", max_length = 50)]
    pub sku: Option<String>,
}

/// `data` of the categories endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryList {
    pub categories: Vec<String>,
}

pub fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// Current time at microsecond precision, the finest every backend stores.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Strictly later than `previous`, even when the clock has not moved.
pub fn next_updated_at(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = timestamp_now();
    let floor = previous + Duration::microseconds(1);
    now.max(floor)
}
