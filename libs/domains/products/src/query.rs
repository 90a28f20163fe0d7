//! List parameters: search, filters, sorting and pagination.

use axum_helpers::{FieldError, Paginated, PaginationMeta, field_errors_from};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;

pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 100;

/// Column a listing is ordered by. Unknown values fall back to `created_at`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortField {
    Name,
    Price,
    #[default]
    CreatedAt,
    UpdatedAt,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Raw query string of the list endpoints. Everything arrives as text so that
/// bad values are reported per parameter instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    /// Case-insensitive substring of name, description or sku
    pub q: Option<String>,
    /// Exact category, case-insensitive
    pub category: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<String>,
    /// Inclusive upper price bound
    pub max_price: Option<String>,
    /// name | price | created_at | updated_at (default created_at)
    pub sort_by: Option<String>,
    /// asc | desc (default desc)
    pub order: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Page size, 1 to 100
    pub per_page: Option<String>,
}

#[derive(Debug, Validate)]
struct PageBounds {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    page: i64,
    #[validate(range(min = 1, max = 100, message = "per_page must be between 1 and 100"))]
    per_page: i64,
}

/// Validated listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: SortField,
    pub order: SortOrder,
    pub page: u64,
    pub per_page: u64,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::with_per_page(DEFAULT_PER_PAGE)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ProductListParams {
    /// Validate into a [`ProductQuery`], collecting every bad parameter.
    pub fn into_query(self, default_per_page: u64) -> ProductResult<ProductQuery> {
        let mut errors = Vec::new();

        let page = parse_param::<i64>(&self.page, "page", "an integer", &mut errors).unwrap_or(1);
        let per_page = parse_param::<i64>(&self.per_page, "per_page", "an integer", &mut errors)
            .unwrap_or(default_per_page as i64);
        let min_price = parse_price(&self.min_price, "min_price", &mut errors);
        let max_price = parse_price(&self.max_price, "max_price", &mut errors);

        if let Err(e) = (PageBounds { page, per_page }).validate() {
            errors.extend(field_errors_from(&e));
        }

        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                errors.push(FieldError::new(
                    "min_price",
                    "min_price must not exceed max_price",
                ));
            }
        }

        if !errors.is_empty() {
            return Err(ProductError::Validation(errors));
        }

        Ok(ProductQuery {
            search: non_blank(self.q),
            category: non_blank(self.category),
            min_price,
            max_price,
            sort_by: self
                .sort_by
                .as_deref()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or_default(),
            order: self
                .order
                .as_deref()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or_default(),
            page: page as u64,
            per_page: per_page as u64,
        })
    }
}

fn parse_param<T: std::str::FromStr>(
    raw: &Option<String>,
    name: &str,
    kind: &str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    let raw = raw.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(FieldError::new(name, format!("{} must be {}", name, kind)));
            None
        }
    }
}

/// `f64::from_str` also accepts `NaN` and `inf`, which no price compares against.
fn parse_price(raw: &Option<String>, name: &str, errors: &mut Vec<FieldError>) -> Option<f64> {
    let value = parse_param::<f64>(raw, name, "a number", errors)?;
    if value.is_finite() {
        Some(value)
    } else {
        errors.push(FieldError::new(name, format!("{} must be a number", name)));
        None
    }
}

impl ProductQuery {
    pub fn with_per_page(per_page: u64) -> Self {
        Self {
            search: None,
            category: None,
            min_price: None,
            max_price: None,
            sort_by: SortField::default(),
            order: SortOrder::default(),
            page: 1,
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Rows to skip before the requested page
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Whether `product` passes the search, category and price filters.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let hit = [
                Some(&product.name),
                product.description.as_ref(),
                product.sku.as_ref(),
            ]
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }

        if let Some(category) = &self.category {
            let same = product
                .category
                .as_deref()
                .is_some_and(|c| c.to_lowercase() == category.to_lowercase());
            if !same {
                return false;
            }
        }

        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }

        true
    }

    /// Ordering by the sort field, ties broken by id ascending.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let primary = match self.sort_by {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        let primary = match self.order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }

    /// Filter, sort and slice an in-memory collection.
    pub fn apply<I>(&self, products: I) -> Paginated<Product>
    where
        I: IntoIterator<Item = Product>,
    {
        let mut selected: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        selected.sort_by(|a, b| self.compare(a, b));

        let total = selected.len() as u64;
        let items = selected
            .into_iter()
            .skip(usize::try_from(self.offset()).unwrap_or(usize::MAX))
            .take(self.per_page as usize)
            .collect();

        Paginated {
            items,
            pagination: PaginationMeta::new(self.page, self.per_page, total),
        }
    }
}
