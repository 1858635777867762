use crate::core::config::DatabaseConfig;
use crate::core::error::AppError;
use crate::shared::constants::{
    MSG_CATEGORY_NOT_FOUND, MSG_DUPLICATE_CATEGORY_NAME, MSG_DUPLICATE_CATEGORY_SLUG,
    MSG_DUPLICATE_PRODUCT_SKU,
};
use crate::shared::types::ListFilter;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Convert database error to more specific AppError with user-friendly messages.
///
/// The unique constraints are the final authority on duplicates; pre-checks
/// in the services only make the common case cheaper.
pub fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // PostgreSQL unique_violation
        if db_err.code().as_deref() == Some("23505") {
            let message = match db_err.constraint() {
                Some("categories_name_key") => MSG_DUPLICATE_CATEGORY_NAME,
                Some("categories_slug_key") => MSG_DUPLICATE_CATEGORY_SLUG,
                Some("products_sku_key") => MSG_DUPLICATE_PRODUCT_SKU,
                _ => "Resource already exists",
            };
            return AppError::Conflict(message.to_string());
        }

        // PostgreSQL foreign_key_violation
        if db_err.code().as_deref() == Some("23503") {
            if db_err.constraint() == Some("products_category_id_fkey") {
                return AppError::NotFound(MSG_CATEGORY_NOT_FOUND.to_string());
            }
            return AppError::BadRequest("Referenced record does not exist.".to_string());
        }
    }

    tracing::error!("Database error: {:?}", e);
    AppError::Database(e)
}

/// Escape `LIKE` metacharacters and wrap the term for substring matching.
pub fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// WHERE clause for the shared list filter.
///
/// The active flag is inlined as a literal; the search pattern, when present,
/// is bound as `$1`. Callers continue numbering from [`ListClause::next_param`].
pub struct ListClause {
    pub where_sql: String,
    pub pattern: Option<String>,
}

impl ListClause {
    pub fn build(filter: &ListFilter, active_column: &str, name_column: &str) -> Self {
        let mut conditions = Vec::new();

        if let Some(active) = filter.active {
            conditions.push(format!("{} = {}", active_column, active));
        }

        let pattern = filter.search.as_deref().map(contains_pattern);
        if pattern.is_some() {
            conditions.push(format!("{} ILIKE $1 ESCAPE '\\'", name_column));
        }

        let where_sql = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        Self { where_sql, pattern }
    }

    pub fn next_param(&self) -> usize {
        if self.pattern.is_some() {
            2
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;

    #[derive(Debug)]
    struct FakeDbError {
        code: &'static str,
        constraint: &'static str,
    }

    impl std::fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "fake {} on {}", self.code, self.constraint)
        }
    }

    impl std::error::Error for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "fake database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    fn db_error(code: &'static str, constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError { code, constraint }))
    }

    #[test]
    fn test_unique_violations_become_conflicts() {
        let cases = [
            ("categories_name_key", MSG_DUPLICATE_CATEGORY_NAME),
            ("categories_slug_key", MSG_DUPLICATE_CATEGORY_SLUG),
            ("products_sku_key", MSG_DUPLICATE_PRODUCT_SKU),
        ];
        for (constraint, expected) in cases {
            match handle_db_error(db_error("23505", constraint)) {
                AppError::Conflict(msg) => assert_eq!(msg, expected),
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn test_missing_category_fk_becomes_not_found() {
        assert!(matches!(
            handle_db_error(db_error("23503", "products_category_id_fkey")),
            AppError::NotFound(msg) if msg == MSG_CATEGORY_NOT_FOUND
        ));
    }

    #[test]
    fn test_other_errors_pass_through() {
        assert!(matches!(
            handle_db_error(sqlx::Error::RowNotFound),
            AppError::Database(_)
        ));
        assert!(matches!(
            handle_db_error(db_error("40001", "whatever")),
            AppError::Database(_)
        ));
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("tv"), "%tv%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\d"), "%c:\\\\d%");
    }

    #[test]
    fn test_list_clause() {
        let none = ListClause::build(&ListFilter::default(), "active", "name");
        assert_eq!(none.where_sql, "");
        assert_eq!(none.next_param(), 1);

        let both = ListClause::build(
            &ListFilter {
                active: Some(false),
                search: Some("tv".to_string()),
                limit: 10,
                offset: 0,
            },
            "p.is_active",
            "p.name",
        );
        assert_eq!(
            both.where_sql,
            "WHERE p.is_active = false AND p.name ILIKE $1 ESCAPE '\\'"
        );
        assert_eq!(both.pattern.as_deref(), Some("%tv%"));
        assert_eq!(both.next_param(), 2);
    }
}
