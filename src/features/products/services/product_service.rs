use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::CategorySummary;
use crate::features::categories::repositories::CategoryRepository;
use crate::features::products::dtos::{CreateProductPayload, ProductDetailDto, ProductListItemDto};
use crate::features::products::models::{NewProduct, ProductWithCategory};
use crate::features::products::repositories::ProductRepository;
use crate::shared::constants::{
    MSG_CATEGORY_NOT_FOUND, MSG_DUPLICATE_PRODUCT_SKU, MSG_PRODUCT_NOT_FOUND,
};
use crate::shared::types::{ListQuery, Pagination};

/// Service for product operations
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// Get a product with its category summary
    pub async fn get(&self, id: Uuid) -> Result<ProductDetailDto> {
        self.products
            .find_by_id(id)
            .await?
            .map(ProductDetailDto::from)
            .ok_or_else(|| AppError::NotFound(MSG_PRODUCT_NOT_FOUND.to_string()))
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<ProductListItemDto>, Pagination)> {
        let (listings, total) = self.products.list(&query.to_filter()).await?;

        Ok((
            listings.into_iter().map(ProductListItemDto::from).collect(),
            query.pagination(total),
        ))
    }

    /// Create a product.
    ///
    /// A referenced category must exist; nothing is written otherwise.
    pub async fn create(&self, payload: CreateProductPayload) -> Result<ProductDetailDto> {
        if self.products.find_by_sku(&payload.sku).await?.is_some() {
            return Err(AppError::Conflict(MSG_DUPLICATE_PRODUCT_SKU.to_string()));
        }

        let category = match payload.category_id {
            Some(category_id) => Some(
                self.categories
                    .find_by_id(category_id)
                    .await?
                    .map(|c| CategorySummary::from(&c))
                    .ok_or_else(|| AppError::NotFound(MSG_CATEGORY_NOT_FOUND.to_string()))?,
            ),
            None => None,
        };

        let product = self
            .products
            .insert(NewProduct {
                name: payload.name,
                sku: payload.sku,
                description: payload.description,
                price: payload.price,
                stock: payload.stock,
                image_url: payload.image_url,
                is_active: payload.is_active,
                category_id: payload.category_id,
            })
            .await?;

        tracing::info!("Product created: id={}, sku={}", product.id, product.sku);

        Ok(ProductWithCategory { product, category }.into())
    }
}
