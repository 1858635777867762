//! In-memory repositories for service and handler tests.
//!
//! `InMemoryCatalog` enforces the same unique and foreign-key rules as the
//! PostgreSQL schema, so conflict handling can be exercised without a database.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::core::config::CatalogConfig;
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{Category, CategorySummary, NewCategory};
use crate::features::categories::repositories::CategoryRepository;
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::products::models::{NewProduct, Product, ProductListing, ProductWithCategory};
use crate::features::products::repositories::ProductRepository;
use crate::features::products::{routes as products_routes, ProductService};
use crate::shared::constants::{
    MSG_CATEGORY_NOT_FOUND, MSG_DUPLICATE_CATEGORY_NAME, MSG_DUPLICATE_CATEGORY_SLUG,
    MSG_DUPLICATE_PRODUCT_SKU,
};
use crate::shared::types::ListFilter;

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    products: Vec<Product>,
}

#[derive(Default)]
pub struct InMemoryCatalog {
    tables: Mutex<Tables>,
    /// Makes lookups miss, as if a concurrent writer had not committed yet
    blind_lookups: AtomicBool,
    clock: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_blind_lookups(&self, blind: bool) {
        self.blind_lookups.store(blind, Ordering::SeqCst);
    }

    pub fn category_count(&self) -> usize {
        self.tables.lock().unwrap().categories.len()
    }

    pub fn product_count(&self) -> usize {
        self.tables.lock().unwrap().products.len()
    }

    fn blind(&self) -> bool {
        self.blind_lookups.load(Ordering::SeqCst)
    }

    /// Strictly increasing timestamps so newest-first ordering is deterministic
    fn next_timestamp(&self) -> chrono::DateTime<Utc> {
        let n = self.clock.fetch_add(1, Ordering::SeqCst) as i64;
        Utc::now() + Duration::milliseconds(n)
    }
}

fn matches_filter(name: &str, active: bool, filter: &ListFilter) -> bool {
    filter.active.map_or(true, |a| a == active)
        && filter
            .search
            .as_deref()
            .map_or(true, |s| name.to_lowercase().contains(&s.to_lowercase()))
}

fn page<T: Clone>(rows: &[T], filter: &ListFilter) -> Vec<T> {
    rows.iter()
        .skip(filter.offset.max(0) as usize)
        .take(filter.limit.max(0) as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl CategoryRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        if self.blind() {
            return Ok(None);
        }
        let tables = self.tables.lock().unwrap();
        Ok(tables.categories.iter().find(|c| c.name == name).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        if self.blind() {
            return Ok(None);
        }
        let tables = self.tables.lock().unwrap();
        Ok(tables.categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn list(&self, filter: &ListFilter) -> Result<(Vec<Category>, i64)> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Category> = tables
            .categories
            .iter()
            .filter(|c| matches_filter(&c.name, c.active, filter))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok((page(&rows, filter), rows.len() as i64))
    }

    async fn insert(&self, new_category: NewCategory) -> Result<Category> {
        let now = self.next_timestamp();
        let mut tables = self.tables.lock().unwrap();
        if tables.categories.iter().any(|c| c.name == new_category.name) {
            return Err(AppError::Conflict(MSG_DUPLICATE_CATEGORY_NAME.to_string()));
        }
        if tables.categories.iter().any(|c| c.slug == new_category.slug) {
            return Err(AppError::Conflict(MSG_DUPLICATE_CATEGORY_SLUG.to_string()));
        }

        let category = Category {
            id: Uuid::new_v4(),
            name: new_category.name,
            slug: new_category.slug,
            description: new_category.description,
            active: true,
            created_at: now,
            updated_at: now,
        };
        tables.categories.push(category.clone());
        Ok(category)
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductWithCategory>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.products.iter().find(|p| p.id == id).map(|p| {
            let category = p
                .category_id
                .and_then(|cid| tables.categories.iter().find(|c| c.id == cid))
                .map(CategorySummary::from);
            ProductWithCategory {
                product: p.clone(),
                category,
            }
        }))
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<Product>> {
        if self.blind() {
            return Ok(None);
        }
        let tables = self.tables.lock().unwrap();
        Ok(tables.products.iter().find(|p| p.sku == sku).cloned())
    }

    async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<Product>> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Product> = tables
            .products
            .iter()
            .filter(|p| p.category_id == Some(category_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list(&self, filter: &ListFilter) -> Result<(Vec<ProductListing>, i64)> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<&Product> = tables
            .products
            .iter()
            .filter(|p| matches_filter(&p.name, p.is_active, filter))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let listings: Vec<ProductListing> = rows
            .iter()
            .map(|p| ProductListing {
                id: p.id,
                name: p.name.clone(),
                category: p
                    .category_id
                    .and_then(|cid| tables.categories.iter().find(|c| c.id == cid))
                    .cloned(),
            })
            .collect();
        Ok((page(&listings, filter), listings.len() as i64))
    }

    async fn insert(&self, new_product: NewProduct) -> Result<Product> {
        let now = self.next_timestamp();
        let mut tables = self.tables.lock().unwrap();
        if tables.products.iter().any(|p| p.sku == new_product.sku) {
            return Err(AppError::Conflict(MSG_DUPLICATE_PRODUCT_SKU.to_string()));
        }
        if let Some(cid) = new_product.category_id {
            if !tables.categories.iter().any(|c| c.id == cid) {
                return Err(AppError::NotFound(MSG_CATEGORY_NOT_FOUND.to_string()));
            }
        }

        let product = Product {
            id: Uuid::new_v4(),
            name: new_product.name,
            sku: new_product.sku,
            description: new_product.description,
            price: new_product.price,
            stock: new_product.stock,
            image_url: new_product.image_url,
            is_active: new_product.is_active,
            category_id: new_product.category_id,
            created_at: now,
            updated_at: now,
        };
        tables.products.push(product.clone());
        Ok(product)
    }
}

pub fn category_service(store: &Arc<InMemoryCatalog>) -> CategoryService {
    CategoryService::new(store.clone(), store.clone(), CatalogConfig::default())
}

pub fn product_service(store: &Arc<InMemoryCatalog>) -> ProductService {
    ProductService::new(store.clone(), store.clone())
}

/// Catalog API router over the in-memory store
pub fn test_server(store: &Arc<InMemoryCatalog>) -> TestServer {
    let app = Router::new()
        .merge(categories_routes::routes(Arc::new(category_service(store))))
        .merge(products_routes::routes(Arc::new(product_service(store))));
    TestServer::new(app).unwrap()
}
