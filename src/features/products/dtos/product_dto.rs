use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::categories::dtos::{CategoryResponseDto, CategorySummaryDto};
use crate::features::products::models::{Product, ProductListing, ProductWithCategory};
use crate::shared::constants::{
    PRODUCT_IMAGE_URL_MAX_LENGTH, PRODUCT_MAX_PRICE, PRODUCT_NAME_MAX_LENGTH,
    PRODUCT_SKU_MAX_LENGTH,
};
use crate::shared::validation::{
    is_url_or_empty, parse_uuid_or_empty, FieldErrors, JsonBody, JsonField, JsonKind,
};

/// Request DTO for creating a product
///
/// Numbers arrive as JSON numbers; `stock` is checked for integrality after
/// parsing so that `1.5` is reported per field instead of rejecting the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDto {
    #[serde(default)]
    #[validate(length(
        max = PRODUCT_NAME_MAX_LENGTH,
        message = "Name must not exceed 255 characters"
    ))]
    pub name: String,

    #[serde(default)]
    #[validate(length(
        max = PRODUCT_SKU_MAX_LENGTH,
        message = "SKU must not exceed 100 characters"
    ))]
    pub sku: String,

    #[serde(default)]
    pub description: Option<String>,

    #[validate(range(
        exclusive_min = 0.0,
        max = PRODUCT_MAX_PRICE,
        message = "Price must be greater than 0 and at most 99999999.99"
    ))]
    pub price: Option<f64>,

    /// Defaults to 0
    #[validate(range(min = 0.0, message = "Stock cannot be negative"))]
    pub stock: Option<f64>,

    /// Absolute URL or empty string
    #[serde(default)]
    #[validate(length(
        max = PRODUCT_IMAGE_URL_MAX_LENGTH,
        message = "Image URL must not exceed 500 characters"
    ))]
    pub image_url: Option<String>,

    /// Defaults to true
    pub is_active: Option<bool>,

    /// Category UUID or empty string for none
    #[serde(default)]
    pub category_id: Option<String>,
}

impl JsonBody for CreateProductDto {
    const FIELDS: &'static [JsonField] = &[
        JsonField::new("name", JsonKind::String),
        JsonField::new("sku", JsonKind::String),
        JsonField::new("description", JsonKind::String).nullable(),
        JsonField::new("price", JsonKind::Number).nullable(),
        JsonField::new("stock", JsonKind::Number).nullable(),
        JsonField::new("imageUrl", JsonKind::String).nullable(),
        JsonField::new("isActive", JsonKind::Boolean).nullable(),
        JsonField::new("categoryId", JsonKind::String).nullable(),
    ];
}

/// Validated, trimmed product input
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductPayload {
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub category_id: Option<Uuid>,
}

impl CreateProductDto {
    /// Trim, check every rule and coerce into typed values.
    pub fn validated(self) -> Result<CreateProductPayload, AppError> {
        let trimmed = Self {
            name: self.name.trim().to_string(),
            sku: self.sku.trim().to_string(),
            description: self.description.map(|d| d.trim().to_string()),
            ..self
        };

        let mut errors = match trimmed.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => e.into(),
        };

        if trimmed.name.is_empty() {
            errors.add("name", "Name is required");
        }
        if trimmed.sku.is_empty() {
            errors.add("sku", "SKU is required");
        }

        let price = match trimmed.price {
            None => {
                errors.add("price", "Price is required");
                None
            }
            Some(p) => match Decimal::from_f64(p).map(|d| d.round_dp(2)) {
                Some(rounded) if rounded > Decimal::ZERO => Some(rounded),
                _ => {
                    // Non-positive input already carries the range message
                    if errors.get("price").is_none() {
                        errors.add("price", "Price must be at least 0.01");
                    }
                    None
                }
            },
        };

        let stock = trimmed.stock.unwrap_or(0.0);
        if stock.fract() != 0.0 {
            errors.add("stock", "Stock must be a whole number");
        }
        if stock > f64::from(i32::MAX) {
            errors.add("stock", "Stock must not exceed 2147483647");
        }

        let image_url = trimmed.image_url.unwrap_or_default();
        if !is_url_or_empty(&image_url) {
            errors.add("image_url", "Invalid image URL");
        }

        let category_id = match parse_uuid_or_empty(trimmed.category_id.as_deref().unwrap_or("")) {
            Ok(id) => id,
            Err(_) => {
                errors.add("category_id", "Invalid category ID");
                None
            }
        };

        errors.into_result()?;

        let price = price.ok_or_else(|| {
            AppError::Internal("price passed validation but could not be converted".to_string())
        })?;

        Ok(CreateProductPayload {
            name: trimmed.name,
            sku: trimmed.sku,
            description: trimmed.description.filter(|d| !d.is_empty()),
            price,
            stock: stock as i32,
            image_url: Some(image_url).filter(|u| !u.is_empty()),
            is_active: trimmed.is_active.unwrap_or(true),
            category_id,
        })
    }
}

/// Response DTO for product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub stock: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            sku: p.sku,
            description: p.description,
            price: p.price,
            stock: p.stock,
            image_url: p.image_url,
            is_active: p.is_active,
            category_id: p.category_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Product with the summary of its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailDto {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub stock: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub category_id: Option<Uuid>,
    pub category: Option<CategorySummaryDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductWithCategory> for ProductDetailDto {
    fn from(row: ProductWithCategory) -> Self {
        let p = row.product;
        Self {
            id: p.id,
            name: p.name,
            sku: p.sku,
            description: p.description,
            price: p.price,
            stock: p.stock,
            image_url: p.image_url,
            is_active: p.is_active,
            category_id: p.category_id,
            category: row.category.map(CategorySummaryDto::from),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// List item: id, name and the owning category (or null)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductListItemDto {
    pub id: Uuid,
    pub name: String,
    pub category: Option<CategoryResponseDto>,
}

impl From<ProductListing> for ProductListItemDto {
    fn from(row: ProductListing) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category.map(CategoryResponseDto::from),
        }
    }
}
