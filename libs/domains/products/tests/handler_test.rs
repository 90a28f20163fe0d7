//! Handler tests for Products domain
//!
//! These tests drive the products router directly (no `/api` prefix, no
//! middleware) against both stores:
//! - request parsing and validation
//! - response envelopes and HTTP status codes
//! - error responses

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use test_utils::{assertions::*, TestDataBuilder, TestDatabase};
use tower::ServiceExt; // For oneshot()

fn memory_app() -> Router {
    let service = ProductService::new(InMemoryProductRepository::new(), ValidationRules::IN_MEMORY);
    handlers::router(service)
}

async fn sql_app(db: &TestDatabase) -> Router {
    let service = ProductService::new(
        SqlProductRepository::new(db.connection()),
        ValidationRules::PERSISTED,
    );
    handlers::router(service)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn create(app: &Router, payload: Value) -> Product {
    let (status, body) = send(app, "POST", "/", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    serde_json::from_value(assert_success(&body, "Product created successfully").clone()).unwrap()
}

#[tokio::test]
async fn test_create_returns_201_with_input_fields() {
    let app = memory_app();
    let builder = TestDataBuilder::from_test_name("handler_create_201");
    let payload = builder.product_payload("main");

    let product = create(&app, payload.clone()).await;

    assert!(product.id.as_uuid().is_some());
    assert_eq!(product.name, payload["name"]);
    assert_eq!(product.price, 19.99);
    assert_eq!(product.stock_quantity, 3);
    assert_eq!(product.sku.as_deref(), payload["sku"].as_str());
    assert_eq!(product.created_at, product.updated_at);
}

#[tokio::test]
async fn test_create_reports_every_invalid_field() {
    let app = memory_app();

    let (status, body) = send(&app, "POST", "/", Some(json!({"name": "", "price": -10}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "Validation failed");
    let fields = error_fields(&body);
    assert!(fields.contains(&"name".to_string()));
    assert!(fields.contains(&"price".to_string()));
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = memory_app();
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_duplicate_sku_returns_409() {
    let db = TestDatabase::new().await;
    let app = sql_app(&db).await;
    let builder = TestDataBuilder::from_test_name("handler_duplicate_sku");
    let payload = builder.product_payload("dup");

    create(&app, payload.clone()).await;
    let (status, body) = send(&app, "POST", "/", Some(payload)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "Product with this SKU already exists");
    assert_eq!(error_fields(&body), vec!["sku"]);
}

#[tokio::test]
async fn test_persisted_rules_require_category_and_sku() {
    let db = TestDatabase::new().await;
    let app = sql_app(&db).await;

    let (status, body) = send(&app, "POST", "/", Some(json!({"name": "Lamp", "price": 0}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["price", "category", "sku"]);
}

#[tokio::test]
async fn test_get_update_delete_flow() {
    let db = TestDatabase::new().await;
    let app = sql_app(&db).await;
    let builder = TestDataBuilder::from_test_name("handler_flow");
    let created = create(&app, builder.product_payload("flow")).await;
    let uri = format!("/{}", created.id);

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_success(&body, "Product retrieved successfully");

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"price": 24.5}))).await;
    assert_eq!(status, StatusCode::OK);
    let updated: Product =
        serde_json::from_value(assert_success(&body, "Product updated successfully").clone())
            .unwrap();
    assert_eq!(updated.price, 24.5);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let deleted = assert_success(&body, "Product deleted successfully");
    assert_eq!(deleted["id"], json!(created.id));

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "Product not found");
}

#[tokio::test]
async fn test_update_rejects_blank_name() {
    let app = memory_app();
    let created = create(&app, TestDataBuilder::new(1).product_payload("a")).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/{}", created.id),
        Some(json!({"name": "  "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["name"]);
}

#[tokio::test]
async fn test_unparsable_or_foreign_ids_are_not_found() {
    let db = TestDatabase::new().await;
    let app = sql_app(&db).await;

    for uri in ["/not-an-id", "/00000000-0000-0000-0000-000000000000", "/99999999999"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["status"], "error");
    }

    let (status, _) = send(&memory_app(), "DELETE", "/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_without_term_is_rejected() {
    let app = memory_app();

    for uri in ["/search", "/search?q=", "/search?q=%20%20"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_error(&body, "Search term is required");
        assert_eq!(error_fields(&body), vec!["q"]);
    }
}

#[tokio::test]
async fn test_search_matches_name_description_and_sku() {
    let app = memory_app();
    let builder = TestDataBuilder::from_test_name("handler_search");
    for suffix in ["alpha", "beta"] {
        create(&app, builder.product_payload(suffix)).await;
    }

    let (status, body) = send(&app, "GET", "/search?q=ALPHA", None).await;
    assert_eq!(status, StatusCode::OK);
    let data = assert_success(&body, "Products retrieved successfully");
    assert_eq!(data["pagination"]["total"], 1);
    assert_eq!(data["items"][0]["name"], builder.name("product", "alpha"));
}

#[tokio::test]
async fn test_pagination_second_page() {
    let app = memory_app();
    let builder = TestDataBuilder::from_test_name("handler_pagination");
    for i in 0..25 {
        create(&app, builder.product_payload(&i.to_string())).await;
    }

    let (status, body) = send(&app, "GET", "/?page=2&per_page=20", None).await;
    assert_eq!(status, StatusCode::OK);

    let data = assert_success(&body, "Products retrieved successfully");
    assert_eq!(data["items"].as_array().unwrap().len(), 5);
    assert_eq!(
        data["pagination"],
        json!({
            "page": 2,
            "per_page": 20,
            "total": 25,
            "pages": 2,
            "has_prev": true,
            "has_next": false
        })
    );
}

#[tokio::test]
async fn test_empty_store_lists_nothing() {
    let (status, body) = send(&memory_app(), "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    let data = assert_success(&body, "Products retrieved successfully");
    assert_eq!(data["items"], json!([]));
    assert_eq!(data["pagination"]["pages"], 0);
    assert_eq!(data["pagination"]["has_next"], false);
}

#[tokio::test]
async fn test_invalid_list_parameters() {
    let app = memory_app();

    let (status, body) = send(&app, "GET", "/?page=0&per_page=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = error_fields(&body);
    assert!(fields.contains(&"page".to_string()));
    assert!(fields.contains(&"per_page".to_string()));

    let (status, _) = send(&app, "GET", "/?min_price=10&max_price=1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_finite_price_filter_is_rejected() {
    let app = memory_app();
    create(&app, TestDataBuilder::from_test_name("handler_nan_price").product_payload("a")).await;

    let (status, body) = send(&app, "GET", "/?min_price=NaN", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body), vec!["min_price".to_string()]);
}

#[tokio::test]
async fn test_sql_page_far_past_the_end_is_empty() {
    let db = TestDatabase::new().await;
    let app = sql_app(&db).await;
    let builder = TestDataBuilder::from_test_name("handler_sql_far_page");
    create(&app, builder.product_payload("a")).await;

    let (status, body) = send(&app, "GET", "/?page=1000000000000000000&per_page=20", None).await;

    assert_eq!(status, StatusCode::OK);
    let data = assert_success(&body, "Products retrieved successfully");
    assert_eq!(data["items"], json!([]));
    assert_eq!(data["pagination"]["total"], 1);
    assert_eq!(data["pagination"]["page"], 1_000_000_000_000_000_000u64);
    assert_eq!(data["pagination"]["has_next"], false);

    let (_, body) = send(&app, "GET", "/?page=2&per_page=20", None).await;
    assert_eq!(body["data"]["items"], json!([]));
}

#[tokio::test]
async fn test_unknown_sort_falls_back_to_newest_first() {
    let app = memory_app();
    let first = create(&app, TestDataBuilder::new(1).product_payload("first")).await;
    let second = create(&app, TestDataBuilder::new(2).product_payload("second")).await;

    let (_, body) = send(&app, "GET", "/?sort_by=colour&order=sideways", None).await;
    let items = &body["data"]["items"];

    // identical timestamps are ordered by id instead
    let ids: Vec<Value> = items.as_array().unwrap().iter().map(|p| p["id"].clone()).collect();
    assert_eq!(ids.len(), 2);
    if first.created_at != second.created_at {
        assert_eq!(ids[0], json!(second.id));
    }
}

#[tokio::test]
async fn test_category_filter_is_case_insensitive() {
    let db = TestDatabase::new().await;
    let app = sql_app(&db).await;
    seed::seed_if_empty(&ProductService::new(
        SqlProductRepository::new(db.connection()),
        ValidationRules::PERSISTED,
    ))
    .await
    .unwrap();

    let (status, body) = send(&app, "GET", "/category/electronics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 2);

    let (_, body) = send(&app, "GET", "/?category=ELECTRONICS&sort_by=price&order=asc", None).await;
    let names: Vec<&str> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Wireless Mouse", "Laptop"]);
}

#[tokio::test]
async fn test_categories_endpoint() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(
        SqlProductRepository::new(db.connection()),
        ValidationRules::PERSISTED,
    );
    seed::seed_if_empty(&service).await.unwrap();
    let app = handlers::router(service);

    let (status, body) = send(&app, "GET", "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    let data = assert_success(&body, "Categories retrieved successfully");
    assert_eq!(
        data["categories"],
        json!(["Electronics", "Furniture", "Office Supplies"])
    );
}
