use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::core::database::{handle_db_error, ListClause};
use crate::core::error::Result;
use crate::features::categories::models::{Category, CategorySummary};
use crate::features::products::models::{NewProduct, Product, ProductListing, ProductWithCategory};
use crate::shared::types::ListFilter;

/// Persistence port for products
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductWithCategory>>;

    async fn find_by_sku(&self, sku: &str) -> Result<Option<Product>>;

    /// Products of one category, newest first
    async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<Product>>;

    /// One page of products with their categories, newest first, plus the total
    async fn list(&self, filter: &ListFilter) -> Result<(Vec<ProductListing>, i64)>;

    /// Unique and foreign-key violations surface as conflict / not-found.
    async fn insert(&self, new_product: NewProduct) -> Result<Product>;
}

const PRODUCT_COLUMNS: &str = "id, name, sku, description, price, stock, image_url, is_active, \
                               category_id, created_at, updated_at";

/// Product joined with the category summary columns
#[derive(Debug, FromRow)]
struct ProductCategoryRow {
    #[sqlx(flatten)]
    product: Product,
    category_name: Option<String>,
    category_slug: Option<String>,
}

impl From<ProductCategoryRow> for ProductWithCategory {
    fn from(row: ProductCategoryRow) -> Self {
        let category = match (row.product.category_id, row.category_name, row.category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(CategorySummary { id, name, slug }),
            _ => None,
        };
        Self {
            product: row.product,
            category,
        }
    }
}

/// List row with the full category flattened into prefixed columns
#[derive(Debug, FromRow)]
struct ProductListingRow {
    id: Uuid,
    name: String,
    category_id: Option<Uuid>,
    category_name: Option<String>,
    category_slug: Option<String>,
    category_description: Option<String>,
    category_active: Option<bool>,
    category_created_at: Option<DateTime<Utc>>,
    category_updated_at: Option<DateTime<Utc>>,
}

impl From<ProductListingRow> for ProductListing {
    fn from(row: ProductListingRow) -> Self {
        let category = match (
            row.category_id,
            row.category_name,
            row.category_slug,
            row.category_active,
            row.category_created_at,
            row.category_updated_at,
        ) {
            (Some(id), Some(name), Some(slug), Some(active), Some(created_at), Some(updated_at)) => {
                Some(Category {
                    id,
                    name,
                    slug,
                    description: row.category_description,
                    active,
                    created_at,
                    updated_at,
                })
            }
            _ => None,
        };

        Self {
            id: row.id,
            name: row.name,
            category,
        }
    }
}

/// PostgreSQL-backed product repository
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductWithCategory>> {
        let row = sqlx::query_as::<_, ProductCategoryRow>(
            r#"
            SELECT p.id, p.name, p.sku, p.description, p.price, p.stock, p.image_url,
                   p.is_active, p.category_id, p.created_at, p.updated_at,
                   c.name AS category_name, c.slug AS category_slug
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(handle_db_error)?;

        Ok(row.map(ProductWithCategory::from))
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<Product>> {
        let query = format!("SELECT {} FROM products WHERE sku = $1", PRODUCT_COLUMNS);

        sqlx::query_as::<_, Product>(&query)
            .bind(sku)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<Product>> {
        let query = format!(
            "SELECT {} FROM products WHERE category_id = $1 ORDER BY created_at DESC, id",
            PRODUCT_COLUMNS
        );

        sqlx::query_as::<_, Product>(&query)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn list(&self, filter: &ListFilter) -> Result<(Vec<ProductListing>, i64)> {
        let clause = ListClause::build(filter, "p.is_active", "p.name");

        let count_query = format!("SELECT COUNT(*) FROM products p {}", clause.where_sql);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(pattern) = &clause.pattern {
            count = count.bind(pattern);
        }
        let total = count.fetch_one(&self.pool).await.map_err(handle_db_error)?;

        let limit_param = clause.next_param();
        let query = format!(
            r#"
            SELECT p.id, p.name, p.category_id,
                   c.name AS category_name, c.slug AS category_slug,
                   c.description AS category_description, c.active AS category_active,
                   c.created_at AS category_created_at, c.updated_at AS category_updated_at
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            {}
            ORDER BY p.created_at DESC, p.id
            LIMIT ${} OFFSET ${}
            "#,
            clause.where_sql,
            limit_param,
            limit_param + 1
        );

        let mut rows = sqlx::query_as::<_, ProductListingRow>(&query);
        if let Some(pattern) = &clause.pattern {
            rows = rows.bind(pattern);
        }
        let listings = rows
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok((listings.into_iter().map(ProductListing::from).collect(), total))
    }

    async fn insert(&self, new_product: NewProduct) -> Result<Product> {
        let query = format!(
            r#"
            INSERT INTO products
                (name, sku, description, price, stock, image_url, is_active, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );

        sqlx::query_as::<_, Product>(&query)
            .bind(new_product.name)
            .bind(new_product.sku)
            .bind(new_product.description)
            .bind(new_product.price)
            .bind(new_product.stock)
            .bind(new_product.image_url)
            .bind(new_product.is_active)
            .bind(new_product.category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)
    }
}
