use std::sync::Arc;

use uuid::Uuid;

use crate::core::config::CatalogConfig;
use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryDetailDto, CategoryListItemDto, CategoryResponseDto, CreateCategoryPayload,
};
use crate::features::categories::models::NewCategory;
use crate::features::categories::repositories::CategoryRepository;
use crate::features::products::dtos::ProductResponseDto;
use crate::features::products::repositories::ProductRepository;
use crate::shared::constants::{
    CATEGORY_SLUG_MAX_LENGTH, MSG_CATEGORY_NOT_FOUND, MSG_DUPLICATE_CATEGORY_NAME,
    MSG_DUPLICATE_CATEGORY_SLUG,
};
use crate::shared::slug::slugify;
use crate::shared::types::{ListQuery, Pagination};
use crate::shared::validation::{FieldErrors, SLUG_REGEX};

/// Service for category operations
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
    config: CatalogConfig,
}

impl CategoryService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            categories,
            products,
            config,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Get a category with its products, newest first
    pub async fn get(&self, id: Uuid) -> Result<CategoryDetailDto> {
        let category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(MSG_CATEGORY_NOT_FOUND.to_string()))?;

        let products = self.products.list_by_category(id).await?;

        Ok(CategoryDetailDto::new(
            category,
            products.into_iter().map(ProductResponseDto::from).collect(),
        ))
    }

    /// List categories with pagination, active filter and name search
    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<CategoryListItemDto>, Pagination)> {
        let (categories, total) = self.categories.list(&query.to_filter()).await?;

        Ok((
            categories.into_iter().map(CategoryListItemDto::from).collect(),
            query.pagination(total),
        ))
    }

    /// Create a category.
    ///
    /// Unique violations raised by the insert map to the same conflicts as
    /// the name and slug lookups.
    pub async fn create(&self, payload: CreateCategoryPayload) -> Result<CategoryResponseDto> {
        let slug = slugify(&payload.name);
        let mut errors = FieldErrors::new();
        if !SLUG_REGEX.is_match(&slug) {
            errors.add(
                "name",
                "Name must contain at least one letter or digit to build a slug",
            );
        } else if slug.len() > CATEGORY_SLUG_MAX_LENGTH {
            errors.add(
                "name",
                format!(
                    "Name produces a slug longer than {} characters",
                    CATEGORY_SLUG_MAX_LENGTH
                ),
            );
        }
        errors.into_result()?;

        if self.categories.find_by_name(&payload.name).await?.is_some() {
            return Err(AppError::Conflict(MSG_DUPLICATE_CATEGORY_NAME.to_string()));
        }

        if self.categories.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::Conflict(MSG_DUPLICATE_CATEGORY_SLUG.to_string()));
        }

        let category = self
            .categories
            .insert(NewCategory {
                name: payload.name,
                slug,
                description: payload.description,
            })
            .await?;

        tracing::info!(
            "Category created: id={}, slug={}",
            category.id,
            category.slug
        );

        Ok(category.into())
    }
}
