use std::env;

use crate::shared::constants::DEFAULT_CATEGORY_DESCRIPTION_MAX_LENGTH;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub catalog: CatalogConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Business policy knobs for catalog validation
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Maximum characters in a category description
    pub category_description_max_length: usize,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            catalog: CatalogConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

/// Read `key`, falling back to `default`, and parse it.
fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String>
where
    T: ToString,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<T>()
        .map_err(|_| format!("{} must be a valid number", key))
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024; // 1MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins = parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );

        let max_request_body_size =
            parse_var("MAX_REQUEST_BODY_SIZE", Self::DEFAULT_MAX_REQUEST_BODY_SIZE)?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Comma-separated origins, blanks dropped
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        Ok(Self {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: parse_var("DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: parse_var(
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_var("DB_IDLE_TIMEOUT_SECS", Self::DEFAULT_IDLE_TIMEOUT_SECS)?,
            max_lifetime_secs: parse_var("DB_MAX_LIFETIME_SECS", Self::DEFAULT_MAX_LIFETIME_SECS)?,
        })
    }
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self, String> {
        let category_description_max_length = parse_var(
            "CATEGORY_DESCRIPTION_MAX_LENGTH",
            DEFAULT_CATEGORY_DESCRIPTION_MAX_LENGTH,
        )?;

        Ok(Self {
            category_description_max_length,
        })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            category_description_max_length: DEFAULT_CATEGORY_DESCRIPTION_MAX_LENGTH,
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Catalog Admin API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Categories and products management API".to_string());

        Ok(Self {
            title,
            version,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert_eq!(
            parse_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test", "http://b.test"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_parse_var_default_and_error() {
        assert_eq!(
            parse_var("CATALOG_ADMIN_TEST_UNSET_VAR", 42u32).unwrap(),
            42
        );

        std::env::set_var("CATALOG_ADMIN_TEST_BAD_VAR", "forty-two");
        let err = parse_var("CATALOG_ADMIN_TEST_BAD_VAR", 1u32).unwrap_err();
        assert!(err.contains("CATALOG_ADMIN_TEST_BAD_VAR"));
    }

    #[test]
    fn test_catalog_config_default_keeps_twenty_chars() {
        assert_eq!(CatalogConfig::default().category_description_max_length, 20);
    }
}
