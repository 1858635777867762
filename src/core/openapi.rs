use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::shared::types::{ApiResponse, Pagination};
use crate::shared::validation::FieldErrors;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::create_category,
        categories_handlers::get_category,
        // Products
        products_handlers::list_products,
        products_handlers::create_product,
        products_handlers::get_product,
    ),
    components(
        schemas(
            // Shared
            Pagination,
            FieldErrors,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryListItemDto,
            categories_dtos::CategoryDetailDto,
            categories_dtos::CategorySummaryDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<categories_dtos::CategoryDetailDto>,
            ApiResponse<Vec<categories_dtos::CategoryListItemDto>>,
            // Products
            products_dtos::CreateProductDto,
            products_dtos::ProductResponseDto,
            products_dtos::ProductDetailDto,
            products_dtos::ProductListItemDto,
            ApiResponse<products_dtos::ProductDetailDto>,
            ApiResponse<Vec<products_dtos::ProductListItemDto>>,
        )
    ),
    tags(
        (name = "categories", description = "Category management"),
        (name = "products", description = "Product management"),
    ),
    info(
        title = "Catalog Admin API",
        version = "0.1.0",
        description = "API documentation for the catalog admin service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_catalog_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        assert_eq!(
            paths,
            vec![
                "/api/category",
                "/api/category/{id}",
                "/api/product",
                "/api/product/{id}"
            ]
        );
    }

    #[test]
    fn test_info_modifier_overrides_defaults() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Shop".to_string(),
            version: "2.0.0".to_string(),
            description: "Staging".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Shop");
        assert_eq!(doc.info.version, "2.0.0");
        assert_eq!(doc.info.description.as_deref(), Some("Staging"));
    }
}
