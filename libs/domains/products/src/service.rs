//! Product Service - Business logic layer

use axum_helpers::Paginated;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductId};
use crate::query::{ProductListParams, ProductQuery, DEFAULT_PER_PAGE, MAX_PER_PAGE};
use crate::repository::ProductRepository;
use crate::validation::{parse_changes, parse_new_product, ValidationRules};

/// Product service providing business logic operations
///
/// Validation always runs before the repository is touched. Payloads arrive
/// as raw JSON so that every field problem can be reported at once.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    rules: ValidationRules,
    default_per_page: u64,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository and field rules
    pub fn new(repository: R, rules: ValidationRules) -> Self {
        Self {
            repository: Arc::new(repository),
            rules,
            default_per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Page size used when a request does not pass `per_page` (clamped to 1..=100)
    pub fn with_default_per_page(mut self, per_page: u64) -> Self {
        self.default_per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Validate raw list parameters
    pub fn parse_query(&self, params: ProductListParams) -> ProductResult<ProductQuery> {
        params.into_query(self.default_per_page)
    }

    /// Create a new product
    #[instrument(skip(self, payload))]
    pub async fn create_product(&self, payload: &Value) -> ProductResult<Product> {
        let input = parse_new_product(payload, &self.rules)?;

        if let Some(ref sku) = input.sku {
            if self.repository.exists_by_sku(sku).await? {
                return Err(ProductError::DuplicateSku(sku.clone()));
            }
        }

        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List products with optional filters
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &ProductQuery) -> ProductResult<Paginated<Product>> {
        self.repository.list(query).await
    }

    /// Search products; the search term is mandatory here
    #[instrument(skip(self))]
    pub async fn search_products(&self, query: &ProductQuery) -> ProductResult<Paginated<Product>> {
        if query.search.is_none() {
            return Err(ProductError::MissingSearchTerm);
        }
        self.repository.list(query).await
    }

    /// Products of one category (case-insensitive), other filters still apply
    #[instrument(skip(self, query))]
    pub async fn products_by_category(
        &self,
        category: &str,
        query: &ProductQuery,
    ) -> ProductResult<Paginated<Product>> {
        let query = ProductQuery {
            category: Some(category.trim().to_string()),
            ..query.clone()
        };
        self.repository.list(&query).await
    }

    /// Update an existing product
    #[instrument(skip(self, payload))]
    pub async fn update_product(&self, id: ProductId, payload: &Value) -> ProductResult<Product> {
        let changes = parse_changes(payload, &self.rules)?;

        // Check if product exists
        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        // Check for duplicate SKU if being changed
        if let Some(ref new_sku) = changes.sku {
            if existing.sku.as_ref() != Some(new_sku)
                && self.repository.exists_by_sku(new_sku).await?
            {
                return Err(ProductError::DuplicateSku(new_sku.clone()));
            }
        }

        self.repository.update(id, changes).await
    }

    /// Delete a product, returning it
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> ProductResult<Product> {
        self.repository.delete(id).await
    }

    /// Distinct categories, ascending
    #[instrument(skip(self))]
    pub async fn categories(&self) -> ProductResult<Vec<String>> {
        self.repository.categories().await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            rules: self.rules,
            default_per_page: self.default_per_page,
        }
    }
}
