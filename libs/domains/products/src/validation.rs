//! Field-level validation of raw product payloads.
//!
//! [`validate`] is pure: it inspects a JSON object and returns every problem
//! found, one per field, in a fixed field order. The extraction helpers below
//! only run on payloads that validated cleanly.

use axum_helpers::FieldError;
use serde_json::{Map, Value};

use crate::error::{ProductError, ProductResult};
use crate::models::{round_price, NewProduct, ProductChanges};

pub const NAME_MAX: usize = 100;
pub const CATEGORY_MAX: usize = 50;
pub const SKU_MAX: usize = 50;

/// Payload fields in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Description,
    Price,
    Category,
    StockQuantity,
    Sku,
}

impl ProductField {
    pub const ALL: [ProductField; 6] = [
        ProductField::Name,
        ProductField::Description,
        ProductField::Price,
        ProductField::Category,
        ProductField::StockQuantity,
        ProductField::Sku,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::Price => "price",
            ProductField::Category => "category",
            ProductField::StockQuantity => "stock_quantity",
            ProductField::Sku => "sku",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRule {
    /// price >= 0
    NonNegative,
    /// price > 0
    Positive,
}

/// Constraints that differ between the two stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Fields a create payload must carry
    pub required: &'static [ProductField],
    pub description_max: usize,
    pub price: PriceRule,
}

impl ValidationRules {
    /// In-memory catalog: name, description and price required; free price.
    pub const IN_MEMORY: ValidationRules = ValidationRules {
        required: &[
            ProductField::Name,
            ProductField::Description,
            ProductField::Price,
        ],
        description_max: 500,
        price: PriceRule::NonNegative,
    };

    /// SQL catalog: name, price, category and sku required; price above zero.
    pub const PERSISTED: ValidationRules = ValidationRules {
        required: &[
            ProductField::Name,
            ProductField::Price,
            ProductField::Category,
            ProductField::Sku,
        ],
        description_max: 1000,
        price: PriceRule::Positive,
    };
}

/// Validate `payload` against `rules`.
///
/// `required` is the set of fields that must be present and non-empty: the
/// rules' own set for a create, empty for an update. Every other check
/// applies to whichever fields are supplied.
pub fn validate(
    payload: &Map<String, Value>,
    required: &[ProductField],
    rules: &ValidationRules,
) -> Vec<FieldError> {
    ProductField::ALL
        .iter()
        .filter_map(|field| check_field(*field, payload.get(field.as_str()), required, rules))
        .collect()
}

fn check_field(
    field: ProductField,
    value: Option<&Value>,
    required: &[ProductField],
    rules: &ValidationRules,
) -> Option<FieldError> {
    let name = field.as_str();

    if is_empty(value) {
        if required.contains(&field) {
            return Some(FieldError::new(name, format!("{} is required", name)));
        }
        // an explicit null means "not supplied"
        if matches!(value, None | Some(Value::Null)) {
            return None;
        }
    }

    let value = value?;
    match field {
        ProductField::Name => check_text(name, value, NAME_MAX, true),
        ProductField::Description => check_text(name, value, rules.description_max, false),
        ProductField::Category => check_text(name, value, CATEGORY_MAX, true),
        ProductField::Sku => check_text(name, value, SKU_MAX, true),
        ProductField::Price => check_price(value, rules.price),
        ProductField::StockQuantity => check_stock(value),
    }
}

fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn check_text(name: &str, value: &Value, max: usize, non_blank: bool) -> Option<FieldError> {
    let Value::String(text) = value else {
        return Some(FieldError::new(name, format!("{} must be a string", name)));
    };
    if non_blank && text.trim().is_empty() {
        return Some(FieldError::new(name, format!("{} cannot be empty", name)));
    }
    if text.chars().count() > max {
        return Some(FieldError::new(
            name,
            format!("{} must be at most {} characters", name, max),
        ));
    }
    None
}

fn check_price(value: &Value, rule: PriceRule) -> Option<FieldError> {
    let Some(price) = parse_number(value) else {
        return Some(FieldError::new("price", "price must be a number"));
    };
    match rule {
        PriceRule::NonNegative if price < 0.0 => {
            Some(FieldError::new("price", "price must be non-negative"))
        }
        PriceRule::Positive if price <= 0.0 => {
            Some(FieldError::new("price", "price must be greater than 0"))
        }
        _ => None,
    }
}

fn check_stock(value: &Value) -> Option<FieldError> {
    match parse_integer(value) {
        Some(qty) if qty >= 0 && qty <= i64::from(i32::MAX) => None,
        _ => Some(FieldError::new(
            "stock_quantity",
            "stock_quantity must be a non-negative integer",
        )),
    }
}

/// JSON number or numeric string, finite only.
fn parse_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn as_object(payload: &Value) -> ProductResult<&Map<String, Value>> {
    payload.as_object().ok_or_else(|| {
        ProductError::Validation(vec![FieldError::new(
            "body",
            "body must be a JSON object",
        )])
    })
}

fn text(payload: &Map<String, Value>, field: ProductField) -> Option<String> {
    match payload.get(field.as_str()) {
        Some(Value::String(s)) => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Text field where an empty string means "no value".
fn optional_text(payload: &Map<String, Value>, field: ProductField) -> Option<String> {
    text(payload, field).filter(|s| !s.is_empty())
}

fn price(payload: &Map<String, Value>) -> Option<f64> {
    payload.get("price").and_then(parse_number).map(round_price)
}

fn stock(payload: &Map<String, Value>) -> Option<i32> {
    payload
        .get("stock_quantity")
        .and_then(parse_integer)
        .and_then(|q| i32::try_from(q).ok())
}

/// Validate a create payload and extract it.
pub fn parse_new_product(payload: &Value, rules: &ValidationRules) -> ProductResult<NewProduct> {
    let map = as_object(payload)?;
    let errors = validate(map, rules.required, rules);
    if !errors.is_empty() {
        return Err(ProductError::Validation(errors));
    }

    let (Some(name), Some(price)) = (text(map, ProductField::Name), price(map)) else {
        // unreachable for both rule sets: name and price are always required
        return Err(ProductError::Validation(vec![
            FieldError::new("name", "name is required"),
            FieldError::new("price", "price is required"),
        ]));
    };

    Ok(NewProduct {
        name,
        description: optional_text(map, ProductField::Description),
        price,
        category: optional_text(map, ProductField::Category),
        stock_quantity: stock(map).unwrap_or(0),
        sku: optional_text(map, ProductField::Sku),
    })
}

/// Validate a partial update payload and extract the supplied fields.
pub fn parse_changes(payload: &Value, rules: &ValidationRules) -> ProductResult<ProductChanges> {
    let map = as_object(payload)?;
    let errors = validate(map, &[], rules);
    if !errors.is_empty() {
        return Err(ProductError::Validation(errors));
    }

    Ok(ProductChanges {
        name: text(map, ProductField::Name),
        description: text(map, ProductField::Description),
        price: price(map),
        category: optional_text(map, ProductField::Category),
        stock_quantity: stock(map),
        sku: optional_text(map, ProductField::Sku),
    })
}
