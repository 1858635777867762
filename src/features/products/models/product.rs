use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::categories::models::{Category, CategorySummary};

/// Database model for product
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields written on insert
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub category_id: Option<Uuid>,
}

/// Product row joined with its category summary
#[derive(Debug, Clone)]
pub struct ProductWithCategory {
    pub product: Product,
    pub category: Option<CategorySummary>,
}

/// List row: id and name plus the full category, if any
#[derive(Debug, Clone)]
pub struct ProductListing {
    pub id: Uuid,
    pub name: String,
    pub category: Option<Category>,
}
