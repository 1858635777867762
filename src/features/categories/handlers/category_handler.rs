use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::categories::dtos::{
    CategoryDetailDto, CategoryListItemDto, CategoryResponseDto, CreateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::constants::{MSG_CATEGORY_CREATED, MSG_CATEGORY_NOT_FOUND};
use crate::shared::types::{ApiResponse, ListQuery};
use crate::shared::validation::{parse_path_id, JsonBody};

/// List categories (paginated, newest first)
#[utoipa::path(
    get,
    path = "/api/category",
    params(ListQuery),
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryListItemDto>>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<CategoryListItemDto>>>> {
    query.validate()?;

    let (categories, pagination) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(categories),
        None,
        Some(pagination),
    )))
}

/// Create a category
///
/// The slug is derived from the name; both must be unique.
#[utoipa::path(
    post,
    path = "/api/category",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Name or slug already exists")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(body): AppJson<serde_json::Value>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    let payload = CreateCategoryDto::from_json(body)?
        .validated(service.config().category_description_max_length)?;

    let category = service.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category),
            Some(MSG_CATEGORY_CREATED.to_string()),
            None,
        )),
    ))
}

/// Get category by ID with its products
#[utoipa::path(
    get,
    path = "/api/category/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryDetailDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CategoryDetailDto>>> {
    let id = parse_path_id(&id, MSG_CATEGORY_NOT_FOUND)?;

    let category = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}
