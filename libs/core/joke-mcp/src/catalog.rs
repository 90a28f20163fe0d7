//! Product catalog tools
//!
//! Each tool drives a [`ProductService`] and answers with the envelope the
//! HTTP API would return for the same request. Domain failures (validation,
//! not found, duplicate sku) are ordinary tool results flagged `isError`;
//! only malformed tool arguments become JSON-RPC errors.

use crate::error::{Error, ErrorContext, Result};
use crate::mcp::{Tool, sealed};
use async_trait::async_trait;
use axum_helpers::{ApiResponse, AppError, Paginated};
use domain_products::validation::{CATEGORY_MAX, NAME_MAX, PriceRule, SKU_MAX};
use domain_products::{
    CategoryList, Product, ProductId, ProductListParams, ProductRepository, ProductResult,
    ProductService, ValidationRules,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    Search,
    Categories,
}

impl Operation {
    const ALL: [Operation; 7] = [
        Operation::List,
        Operation::Get,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
        Operation::Search,
        Operation::Categories,
    ];
}

/// One catalog operation exposed as an MCP tool
pub struct CatalogTool<R: ProductRepository> {
    operation: Operation,
    service: Arc<ProductService<R>>,
}

impl<R: ProductRepository> CatalogTool<R> {
    /// Every catalog tool, sharing one service
    pub fn all(service: Arc<ProductService<R>>) -> Vec<Self> {
        Operation::ALL
            .into_iter()
            .map(|operation| Self {
                operation,
                service: Arc::clone(&service),
            })
            .collect()
    }

    async fn list(&self, params: &Value) -> ProductResult<Paginated<Product>> {
        let query = self.service.parse_query(list_params(params, "search"))?;
        self.service.list_products(&query).await
    }

    async fn search(&self, params: &Value) -> ProductResult<Paginated<Product>> {
        let query = self.service.parse_query(list_params(params, "q"))?;
        self.service.search_products(&query).await
    }

    async fn categories(&self) -> ProductResult<CategoryList> {
        let categories = self.service.categories().await?;
        Ok(CategoryList { categories })
    }
}

impl<R: ProductRepository> sealed::Sealed for CatalogTool<R> {}

#[async_trait]
impl<R: ProductRepository + 'static> Tool for CatalogTool<R> {
    fn name(&self) -> &'static str {
        match self.operation {
            Operation::List => "list_products",
            Operation::Get => "get_product",
            Operation::Create => "create_product",
            Operation::Update => "update_product",
            Operation::Delete => "delete_product",
            Operation::Search => "search_products",
            Operation::Categories => "get_categories",
        }
    }

    fn description(&self) -> &'static str {
        match self.operation {
            Operation::List => {
                "List products with pagination, search, category and price filters, and sorting."
            }
            Operation::Get => "Get a single product by ID.",
            Operation::Create => "Create a new product.",
            Operation::Update => "Update an existing product. Only the given fields change.",
            Operation::Delete => "Delete a product by ID and return it.",
            Operation::Search => "Search products by name, description or SKU.",
            Operation::Categories => "List the distinct product categories.",
        }
    }

    fn input_schema(&self) -> Value {
        match self.operation {
            Operation::List => listing_schema("search", false),
            Operation::Search => listing_schema("q", true),
            Operation::Get | Operation::Delete => json!({
                "type": "object",
                "properties": {
                    "product_id": {
                        "type": ["string", "integer"],
                        "description": "Product ID"
                    }
                },
                "required": ["product_id"]
            }),
            Operation::Create => {
                let rules = self.service.rules();
                let mut schema = product_fields_schema(rules);
                let required: Vec<&str> = rules.required.iter().map(|f| f.as_str()).collect();
                schema["required"] = json!(required);
                schema
            }
            Operation::Update => {
                let mut schema = product_fields_schema(self.service.rules());
                schema["properties"]["product_id"] = json!({
                    "type": ["string", "integer"],
                    "description": "Product ID"
                });
                schema["required"] = json!(["product_id"]);
                schema
            }
            Operation::Categories => json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    async fn execute(&self, params: Value) -> Result<Value> {
        match self.operation {
            Operation::List => envelope(
                self.list(&params).await,
                "Products retrieved successfully",
            ),
            Operation::Search => envelope(
                self.search(&params).await,
                "Products retrieved successfully",
            ),
            Operation::Get => match product_id(&params)? {
                Some(id) => envelope(
                    self.service.get_product(id).await,
                    "Product retrieved successfully",
                ),
                None => not_found(),
            },
            Operation::Create => envelope(
                self.service.create_product(&params).await,
                "Product created successfully",
            ),
            Operation::Update => {
                let id = product_id(&params)?;
                let mut changes = params;
                if let Some(fields) = changes.as_object_mut() {
                    fields.remove("product_id");
                }
                match id {
                    Some(id) => envelope(
                        self.service.update_product(id, &changes).await,
                        "Product updated successfully",
                    ),
                    None => not_found(),
                }
            }
            Operation::Delete => match product_id(&params)? {
                Some(id) => envelope(
                    self.service.delete_product(id).await,
                    "Product deleted successfully",
                ),
                None => not_found(),
            },
            Operation::Categories => envelope(
                self.categories().await,
                "Categories retrieved successfully",
            ),
        }
    }
}

/// Tool arguments arrive as JSON scalars; the query layer parses strings.
fn arg_string(params: &Value, key: &str) -> Option<String> {
    match params.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn list_params(params: &Value, search_key: &str) -> ProductListParams {
    ProductListParams {
        q: arg_string(params, search_key),
        category: arg_string(params, "category"),
        min_price: arg_string(params, "min_price"),
        max_price: arg_string(params, "max_price"),
        sort_by: arg_string(params, "sort_by"),
        order: arg_string(params, "order"),
        page: arg_string(params, "page"),
        per_page: arg_string(params, "per_page"),
    }
}

/// `Ok(None)` for an id that is neither an integer nor a UUID
fn product_id(params: &Value) -> Result<Option<ProductId>> {
    let raw = arg_string(params, "product_id")
        .ok_or_else(|| Error::invalid_params("Missing 'product_id' parameter"))?;
    Ok(raw.trim().parse().ok())
}

fn envelope<T: Serialize>(result: ProductResult<T>, message: &str) -> Result<Value> {
    match result {
        Ok(data) => {
            serde_json::to_value(ApiResponse::success(message, data)).with_context("tool response")
        }
        Err(err) => error_envelope(AppError::from(err)),
    }
}

fn not_found() -> Result<Value> {
    error_envelope(AppError::NotFound("Product not found".to_string()))
}

fn error_envelope(err: AppError) -> Result<Value> {
    if err.status_code().is_server_error() {
        error!(error = %err, "Catalog tool failed");
    }
    serde_json::to_value(err.to_error_response()).with_context("tool error response")
}

fn listing_schema(search_key: &str, search_required: bool) -> Value {
    let mut schema = json!({
        "type": "object",
        "properties": {
            "category": {"type": "string", "description": "Exact category, case-insensitive"},
            "min_price": {"type": "number"},
            "max_price": {"type": "number"},
            "sort_by": {
                "type": "string",
                "enum": ["name", "price", "created_at", "updated_at"],
                "default": "created_at"
            },
            "order": {"type": "string", "enum": ["asc", "desc"], "default": "desc"},
            "page": {"type": "integer", "minimum": 1, "default": 1},
            "per_page": {"type": "integer", "minimum": 1, "maximum": 100, "default": 20}
        }
    });
    schema["properties"][search_key] = json!({
        "type": "string",
        "description": "Search term matched against name, description and SKU"
    });
    if search_required {
        schema["required"] = json!([search_key]);
    }
    schema
}

fn product_fields_schema(rules: &ValidationRules) -> Value {
    let price = match rules.price {
        PriceRule::NonNegative => json!({"type": "number", "minimum": 0}),
        PriceRule::Positive => json!({"type": "number", "exclusiveMinimum": 0}),
    };
    json!({
        "type": "object",
        "properties": {
            "name": {"type": "string", "maxLength": NAME_MAX},
            "description": {"type": "string", "maxLength": rules.description_max},
            "price": price,
            "category": {"type": "string", "maxLength": CATEGORY_MAX},
            "stock_quantity": {"type": "integer", "minimum": 0},
            "sku": {"type": "string", "maxLength": SKU_MAX}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_string_accepts_scalars() {
        let params = json!({"page": 2, "min_price": 9.5, "q": "mouse", "category": null});
        assert_eq!(arg_string(&params, "page").as_deref(), Some("2"));
        assert_eq!(arg_string(&params, "min_price").as_deref(), Some("9.5"));
        assert_eq!(arg_string(&params, "q").as_deref(), Some("mouse"));
        assert_eq!(arg_string(&params, "category"), None);
        assert_eq!(arg_string(&params, "missing"), None);
    }

    #[test]
    fn test_product_id_argument() {
        assert!(matches!(
            product_id(&json!({"product_id": 7})).unwrap(),
            Some(ProductId::Serial(7))
        ));
        assert!(product_id(&json!({"product_id": "laptop"})).unwrap().is_none());
        assert!(matches!(
            product_id(&json!({})),
            Err(Error::InvalidParams { .. })
        ));
    }

    #[test]
    fn test_product_schema_follows_store_rules() {
        let schema = product_fields_schema(&ValidationRules::IN_MEMORY);
        assert_eq!(schema["properties"]["price"]["minimum"], 0);
        assert_eq!(schema["properties"]["description"]["maxLength"], 500);

        let schema = product_fields_schema(&ValidationRules::PERSISTED);
        assert_eq!(schema["properties"]["price"]["exclusiveMinimum"], 0);
        assert_eq!(schema["properties"]["description"]["maxLength"], 1000);
    }

    #[test]
    fn test_search_schema_requires_term() {
        assert_eq!(listing_schema("q", true)["required"], json!(["q"]));
        assert!(listing_schema("search", false).get("required").is_none());
    }
}
