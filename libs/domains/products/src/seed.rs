//! Sample catalog for development databases.

use serde_json::{json, Value};
use tracing::info;

use crate::error::ProductResult;
use crate::query::ProductQuery;
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub fn sample_products() -> Vec<Value> {
    vec![
        json!({
            "name": "Laptop",
            "description": "High-performance laptop for developers",
            "price": 999.99,
            "category": "Electronics",
            "stock_quantity": 10,
            "sku": "LAP-001"
        }),
        json!({
            "name": "Coffee Mug",
            "description": "Ceramic coffee mug with company logo",
            "price": 15.99,
            "category": "Office Supplies",
            "stock_quantity": 50,
            "sku": "MUG-001"
        }),
        json!({
            "name": "Wireless Mouse",
            "description": "Ergonomic wireless mouse",
            "price": 29.99,
            "category": "Electronics",
            "stock_quantity": 25,
            "sku": "MOU-001"
        }),
        json!({
            "name": "Desk Chair",
            "description": "Adjustable office chair with lumbar support",
            "price": 299.00,
            "category": "Furniture",
            "stock_quantity": 5,
            "sku": "CHR-001"
        }),
    ]
}

/// Insert the sample catalog through the service when the store is empty.
///
/// Returns how many products were inserted.
pub async fn seed_if_empty<R: ProductRepository>(service: &ProductService<R>) -> ProductResult<usize> {
    let existing = service.list_products(&ProductQuery::with_per_page(1)).await?;
    if existing.pagination.total > 0 {
        info!(
            total = existing.pagination.total,
            "Store already populated, skipping seed data"
        );
        return Ok(0);
    }

    let samples = sample_products();
    for payload in &samples {
        service.create_product(payload).await?;
    }

    info!(count = samples.len(), "Sample products added");
    Ok(samples.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryProductRepository;
    use crate::validation::ValidationRules;

    #[tokio::test]
    async fn test_seed_runs_once() {
        let service = ProductService::new(
            InMemoryProductRepository::new(),
            ValidationRules::IN_MEMORY,
        );

        assert_eq!(seed_if_empty(&service).await.unwrap(), 4);
        assert_eq!(seed_if_empty(&service).await.unwrap(), 0);
        assert_eq!(
            service.categories().await.unwrap(),
            vec!["Electronics", "Furniture", "Office Supplies"]
        );
    }

    #[tokio::test]
    async fn test_samples_satisfy_persisted_rules() {
        for payload in sample_products() {
            crate::validation::parse_new_product(&payload, &ValidationRules::PERSISTED).unwrap();
        }
    }
}
