use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::validation::FieldErrors;

/// Response envelope shared by every endpoint.
///
/// Success: `{ success: true, data, message?, pagination? }`.
/// Failure: `{ success: false, error, details?, message? }`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<FieldErrors>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, pagination: Option<Pagination>) -> Self {
        Self {
            success: true,
            data,
            message,
            pagination,
            error: None,
            details: None,
        }
    }

    pub fn error(
        error: String,
        details: Option<FieldErrors>,
        message: Option<String>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            pagination: None,
            error: Some(error),
            details,
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let limit = limit.max(1);
        // ceil(total / limit) without going through floats
        let total_pages = (total.max(0) + limit - 1) / limit;
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Query parameters accepted by every list endpoint
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: i64,

    /// Items per page (default: 10, max: 100)
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100)]
    #[validate(range(min = 1, message = "Limit must be greater than 0"))]
    pub limit: i64,

    /// Filter by active flag (absent = both)
    pub active: Option<bool>,

    /// Substring to match against the name (case-insensitive)
    pub query: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            active: None,
            query: None,
        }
    }
}

impl ListQuery {
    /// Page size clamped to MAX_PAGE_SIZE
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }

    /// SQL OFFSET for the requested page
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit())
    }

    /// Search term, or `None` when absent or blank
    pub fn search_term(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    pub fn to_filter(&self) -> ListFilter {
        ListFilter {
            active: self.active,
            search: self.search_term().map(str::to_string),
            limit: self.limit(),
            offset: self.offset(),
        }
    }

    pub fn pagination(&self, total: i64) -> Pagination {
        Pagination::new(self.page, self.limit(), total)
    }
}

/// Storage-level list filter derived from a [`ListQuery`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub active: Option<bool>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
