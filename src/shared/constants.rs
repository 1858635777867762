/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// FIELD LIMITS (mirror the column sizes in migrations/)
// =============================================================================

pub const CATEGORY_NAME_MAX_LENGTH: u64 = 100;
pub const CATEGORY_SLUG_MAX_LENGTH: usize = 150;

/// Default upper bound for category descriptions. Overridable through
/// `CATEGORY_DESCRIPTION_MAX_LENGTH`.
pub const DEFAULT_CATEGORY_DESCRIPTION_MAX_LENGTH: usize = 20;

pub const PRODUCT_NAME_MAX_LENGTH: u64 = 255;
pub const PRODUCT_SKU_MAX_LENGTH: u64 = 100;
pub const PRODUCT_IMAGE_URL_MAX_LENGTH: u64 = 500;

/// Largest value that fits `NUMERIC(10, 2)`
pub const PRODUCT_MAX_PRICE: f64 = 99_999_999.99;

// =============================================================================
// CONDITION MESSAGES
// =============================================================================

pub const MSG_CATEGORY_NOT_FOUND: &str = "Category not found";
pub const MSG_PRODUCT_NOT_FOUND: &str = "Product not found";
pub const MSG_DUPLICATE_CATEGORY_NAME: &str = "A category with this name already exists";
pub const MSG_DUPLICATE_CATEGORY_SLUG: &str = "A category with this slug already exists";
pub const MSG_DUPLICATE_PRODUCT_SKU: &str = "A product with this SKU already exists";

pub const MSG_CATEGORY_CREATED: &str = "Category created successfully";
pub const MSG_PRODUCT_CREATED: &str = "Product created successfully";
