use async_trait::async_trait;
use axum_helpers::Paginated;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductChanges, ProductId};
use crate::query::ProductQuery;

/// Repository trait for Product persistence
///
/// Implementations: [`InMemoryProductRepository`] and
/// [`SqlProductRepository`](crate::sql::SqlProductRepository).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>>;

    /// Filter, sort and paginate
    async fn list(&self, query: &ProductQuery) -> ProductResult<Paginated<Product>>;

    /// Apply a partial update
    async fn update(&self, id: ProductId, changes: ProductChanges) -> ProductResult<Product>;

    /// Delete a product, returning what was removed
    async fn delete(&self, id: ProductId) -> ProductResult<Product>;

    /// Distinct non-empty categories, ascending
    async fn categories(&self) -> ProductResult<Vec<String>>;

    /// Check if a product SKU exists
    async fn exists_by_sku(&self, sku: &str) -> ProductResult<bool>;
}

/// Process-local store keyed by generated UUIDs.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

fn sku_taken(products: &HashMap<Uuid, Product>, sku: &str, except: Option<Uuid>) -> bool {
    products
        .values()
        .any(|p| p.sku.as_deref() == Some(sku) && Some(key_of(p)) != except)
}

fn key_of(product: &Product) -> Uuid {
    product.id.as_uuid().unwrap_or_default()
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if let Some(sku) = input.sku.as_deref() {
            if sku_taken(&products, sku, None) {
                return Err(ProductError::DuplicateSku(sku.to_string()));
            }
        }

        let id = Uuid::new_v4();
        let product = Product::from_new(ProductId::Uuid(id), input);
        products.insert(id, product.clone());

        info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>> {
        let Some(key) = id.as_uuid() else {
            return Ok(None);
        };
        Ok(self.products.read().await.get(&key).cloned())
    }

    async fn list(&self, query: &ProductQuery) -> ProductResult<Paginated<Product>> {
        let products = self.products.read().await;
        Ok(query.apply(products.values().cloned()))
    }

    async fn update(&self, id: ProductId, changes: ProductChanges) -> ProductResult<Product> {
        let key = id.as_uuid().ok_or(ProductError::NotFound(id))?;
        let mut products = self.products.write().await;

        if !products.contains_key(&key) {
            return Err(ProductError::NotFound(id));
        }
        if let Some(sku) = changes.sku.as_deref() {
            if sku_taken(&products, sku, Some(key)) {
                return Err(ProductError::DuplicateSku(sku.to_string()));
            }
        }

        let product = products.get_mut(&key).ok_or(ProductError::NotFound(id))?;
        product.apply_changes(changes);

        info!(product_id = %id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> ProductResult<Product> {
        let key = id.as_uuid().ok_or(ProductError::NotFound(id))?;
        let removed = self
            .products
            .write()
            .await
            .remove(&key)
            .ok_or(ProductError::NotFound(id))?;

        info!(product_id = %id, "Deleted product");
        Ok(removed)
    }

    async fn categories(&self) -> ProductResult<Vec<String>> {
        let products = self.products.read().await;
        let mut categories: Vec<String> = products
            .values()
            .filter_map(|p| p.category.clone())
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn exists_by_sku(&self, sku: &str) -> ProductResult<bool> {
        Ok(sku_taken(&*self.products.read().await, sku, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str, sku: Option<&str>, category: Option<&str>) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: Some(format!("{name} description")),
            price: 10.0,
            category: category.map(str::to_string),
            stock_quantity: 0,
            sku: sku.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_unique_uuid_ids() {
        let repo = InMemoryProductRepository::new();
        let a = repo.create(new_product("A", None, None)).await.unwrap();
        let b = repo.create(new_product("B", None, None)).await.unwrap();

        assert!(a.id.as_uuid().is_some());
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_sku_uniqueness() {
        let repo = InMemoryProductRepository::new();
        repo.create(new_product("A", Some("SKU-1"), None)).await.unwrap();

        let err = repo
            .create(new_product("B", Some("SKU-1"), None))
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::DuplicateSku(sku) if sku == "SKU-1"));

        // products without a sku never collide
        repo.create(new_product("C", None, None)).await.unwrap();
        repo.create(new_product("D", None, None)).await.unwrap();
        assert!(repo.exists_by_sku("SKU-1").await.unwrap());
        assert!(!repo.exists_by_sku("SKU-2").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_keeping_own_sku_is_allowed() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(new_product("A", Some("SKU-1"), None)).await.unwrap();

        let updated = repo
            .update(
                product.id,
                ProductChanges {
                    sku: Some("SKU-1".into()),
                    stock_quantity: Some(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.stock_quantity, 3);
        assert!(updated.updated_at > product.updated_at);
    }

    #[tokio::test]
    async fn test_update_to_taken_sku_conflicts() {
        let repo = InMemoryProductRepository::new();
        repo.create(new_product("A", Some("SKU-1"), None)).await.unwrap();
        let b = repo.create(new_product("B", Some("SKU-2"), None)).await.unwrap();

        let err = repo
            .update(
                b.id,
                ProductChanges {
                    sku: Some("SKU-1".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::DuplicateSku(_)));
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(new_product("A", None, None)).await.unwrap();

        let removed = repo.delete(product.id).await.unwrap();
        assert_eq!(removed, product);
        assert_eq!(repo.get_by_id(product.id).await.unwrap(), None);
        assert!(matches!(
            repo.delete(product.id).await,
            Err(ProductError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_serial_ids_never_match() {
        let repo = InMemoryProductRepository::new();
        assert_eq!(repo.get_by_id(ProductId::Serial(1)).await.unwrap(), None);
        assert!(matches!(
            repo.update(ProductId::Serial(1), ProductChanges::default()).await,
            Err(ProductError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_categories_are_distinct_and_sorted() {
        let repo = InMemoryProductRepository::new();
        for (name, category) in [
            ("A", Some("Furniture")),
            ("B", Some("Electronics")),
            ("C", Some("Electronics")),
            ("D", None),
        ] {
            repo.create(new_product(name, None, category)).await.unwrap();
        }

        assert_eq!(
            repo.categories().await.unwrap(),
            vec!["Electronics".to_string(), "Furniture".to_string()]
        );
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemoryProductRepository::new();
        let handle = repo.clone();
        repo.create(new_product("A", None, None)).await.unwrap();
        assert!(!handle.is_empty().await);
    }
}
