use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::products::dtos::{CreateProductDto, ProductDetailDto, ProductListItemDto};
use crate::features::products::services::ProductService;
use crate::shared::constants::{MSG_PRODUCT_CREATED, MSG_PRODUCT_NOT_FOUND};
use crate::shared::types::{ApiResponse, ListQuery};
use crate::shared::validation::{parse_path_id, JsonBody};

/// List products with their categories (paginated, newest first)
#[utoipa::path(
    get,
    path = "/api/product",
    params(ListQuery),
    responses(
        (status = 200, description = "List of products", body = ApiResponse<Vec<ProductListItemDto>>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "products"
)]
pub async fn list_products(
    State(service): State<Arc<ProductService>>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<ProductListItemDto>>>> {
    query.validate()?;

    let (products, pagination) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(products),
        None,
        Some(pagination),
    )))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/product",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductDetailDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "SKU already exists")
    ),
    tag = "products"
)]
pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    AppJson(body): AppJson<serde_json::Value>,
) -> Result<(StatusCode, Json<ApiResponse<ProductDetailDto>>)> {
    let payload = CreateProductDto::from_json(body)?.validated()?;

    let product = service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(product),
            Some(MSG_PRODUCT_CREATED.to_string()),
            None,
        )),
    ))
}

/// Get product by ID with its category
#[utoipa::path(
    get,
    path = "/api/product/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductDetailDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(service): State<Arc<ProductService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProductDetailDto>>> {
    let id = parse_path_id(&id, MSG_PRODUCT_NOT_FOUND)?;

    let product = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}
