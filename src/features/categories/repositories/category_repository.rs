use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::{handle_db_error, ListClause};
use crate::core::error::Result;
use crate::features::categories::models::{Category, NewCategory};
use crate::shared::types::ListFilter;

/// Persistence port for categories
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>>;

    /// One page of categories, newest first, plus the unpaged total
    async fn list(&self, filter: &ListFilter) -> Result<(Vec<Category>, i64)>;

    /// Insert with `active = true`. Unique violations surface as conflicts.
    async fn insert(&self, new_category: NewCategory) -> Result<Category>;
}

const CATEGORY_COLUMNS: &str = "id, name, slug, description, active, created_at, updated_at";

/// PostgreSQL-backed category repository
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one_by(&self, column: &str, value: &str) -> Result<Option<Category>> {
        let query = format!(
            "SELECT {} FROM categories WHERE {} = $1",
            CATEGORY_COLUMNS, column
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let query = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);

        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        self.find_one_by("name", name).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        self.find_one_by("slug", slug).await
    }

    async fn list(&self, filter: &ListFilter) -> Result<(Vec<Category>, i64)> {
        let clause = ListClause::build(filter, "active", "name");

        let count_query = format!("SELECT COUNT(*) FROM categories {}", clause.where_sql);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(pattern) = &clause.pattern {
            count = count.bind(pattern);
        }
        let total = count.fetch_one(&self.pool).await.map_err(handle_db_error)?;

        let limit_param = clause.next_param();
        let query = format!(
            r#"
            SELECT {}
            FROM categories
            {}
            ORDER BY created_at DESC, id
            LIMIT ${} OFFSET ${}
            "#,
            CATEGORY_COLUMNS,
            clause.where_sql,
            limit_param,
            limit_param + 1
        );

        let mut rows = sqlx::query_as::<_, Category>(&query);
        if let Some(pattern) = &clause.pattern {
            rows = rows.bind(pattern);
        }
        let categories = rows
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(handle_db_error)?;

        Ok((categories, total))
    }

    async fn insert(&self, new_category: NewCategory) -> Result<Category> {
        let query = format!(
            r#"
            INSERT INTO categories (name, slug, description, active)
            VALUES ($1, $2, $3, TRUE)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(new_category.name)
            .bind(new_category.slug)
            .bind(new_category.description)
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)
    }
}
