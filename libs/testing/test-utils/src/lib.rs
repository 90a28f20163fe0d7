//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for the catalog crates:
//! - `TestDatabase`: migrated in-memory SQLite database (always available)
//! - `PostgresTestDatabase`: PostgreSQL container with automatic cleanup (feature: "postgres")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//! - `assertions`: envelope assertion helpers (always available)
//!
//! # Features
//!
//! - `postgres`: Enables PostgreSQL container infrastructure (needs Docker)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_sql_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let payload = builder.product_payload("main");
//! }
//! ```

use serde_json::{Value, json};

mod sqlite;

#[cfg(feature = "postgres")]
mod postgres;

pub use sqlite::TestDatabase;

#[cfg(feature = "postgres")]
pub use postgres::PostgresTestDatabase;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique name for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let name = TestDataBuilder::new(7).name("product", "main");
    /// assert_eq!(name, "test-product-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// SKU unique per seed and suffix, at most 50 characters
    pub fn sku(&self, suffix: &str) -> String {
        let mut sku = format!("SKU-{:X}-{}", self.seed, suffix.to_uppercase());
        sku.truncate(50);
        sku
    }

    /// A create payload valid under both the in-memory and persisted rules
    pub fn product_payload(&self, suffix: &str) -> Value {
        json!({
            "name": self.name("product", suffix),
            "description": format!("Generated product {}", suffix),
            "price": 19.99,
            "category": "Testing",
            "stock_quantity": 3,
            "sku": self.sku(suffix),
        })
    }
}

/// Assertion helpers for `{status, message, data|errors}` envelopes
pub mod assertions {
    use serde_json::Value;

    /// Assert a success envelope and return its `data`
    pub fn assert_success<'a>(body: &'a Value, message: &str) -> &'a Value {
        assert_eq!(body["status"], "success", "expected success envelope: {}", body);
        assert_eq!(body["message"], message, "unexpected message: {}", body);
        &body["data"]
    }

    /// Assert an error envelope with the given message
    pub fn assert_error(body: &Value, message: &str) {
        assert_eq!(body["status"], "error", "expected error envelope: {}", body);
        assert_eq!(body["message"], message, "unexpected message: {}", body);
    }

    /// Field names listed under `errors`, in order
    pub fn error_fields(body: &Value) -> Vec<String> {
        body["errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e["field"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
