//! HTTP handlers for Products API

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    ApiResponse, IdPath, JsonBody, Paginated, QueryParams, Success,
};
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CategoryList, Product, ProductId, ProductPayload};
use crate::query::{ProductListParams, SortField, SortOrder};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        search_products,
        get_by_category,
        get_categories,
    ),
    components(
        schemas(Product, ProductId, ProductPayload, CategoryList, SortField, SortOrder),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route("/categories", get(get_categories))
        .route("/category/{category}", get(get_by_category))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List products with optional search, filters, sorting and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductListParams),
    responses(
        (status = 200, description = "Products retrieved successfully", body = ApiResponse<Paginated<Product>>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    QueryParams(params): QueryParams<ProductListParams>,
) -> ProductResult<Success<Paginated<Product>>> {
    let query = service.parse_query(params)?;
    let page = service.list_products(&query).await?;
    Ok(Success::ok("Products retrieved successfully", page))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonBody(payload): JsonBody<Value>,
) -> ProductResult<Success<Product>> {
    let product = service.create_product(&payload).await?;
    Ok(Success::created("Product created successfully", product))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (integer or UUID)")
    ),
    responses(
        (status = 200, description = "Product retrieved successfully", body = ApiResponse<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath<ProductId>,
) -> ProductResult<Success<Product>> {
    let product = service.get_product(id).await?;
    Ok(Success::ok("Product retrieved successfully", product))
}

/// Partially update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (integer or UUID)")
    ),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath<ProductId>,
    JsonBody(payload): JsonBody<Value>,
) -> ProductResult<Success<Product>> {
    let product = service.update_product(id, &payload).await?;
    Ok(Success::ok("Product updated successfully", product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (integer or UUID)")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = ApiResponse<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath<ProductId>,
) -> ProductResult<Success<Product>> {
    let product = service.delete_product(id).await?;
    Ok(Success::ok("Product deleted successfully", product))
}

/// Search products by name, description or SKU
#[utoipa::path(
    get,
    path = "/search",
    tag = "Products",
    params(ProductListParams),
    responses(
        (status = 200, description = "Search results", body = ApiResponse<Paginated<Product>>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    QueryParams(params): QueryParams<ProductListParams>,
) -> ProductResult<Success<Paginated<Product>>> {
    let query = service.parse_query(params)?;
    let page = service.search_products(&query).await?;
    Ok(Success::ok("Products retrieved successfully", page))
}

/// Products of one category (case-insensitive)
#[utoipa::path(
    get,
    path = "/category/{category}",
    tag = "Products",
    params(
        ("category" = String, Path, description = "Category name"),
        ProductListParams
    ),
    responses(
        (status = 200, description = "Products in the category", body = ApiResponse<Paginated<Product>>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(category): Path<String>,
    QueryParams(params): QueryParams<ProductListParams>,
) -> ProductResult<Success<Paginated<Product>>> {
    let query = service.parse_query(params)?;
    let page = service.products_by_category(&category, &query).await?;
    Ok(Success::ok("Products retrieved successfully", page))
}

/// Distinct product categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Products",
    responses(
        (status = 200, description = "Categories retrieved successfully", body = ApiResponse<CategoryList>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_categories<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Success<CategoryList>> {
    let categories = service.categories().await?;
    Ok(Success::ok(
        "Categories retrieved successfully",
        CategoryList { categories },
    ))
}
