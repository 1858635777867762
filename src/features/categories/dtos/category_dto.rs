use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::categories::models::{Category, CategorySummary};
use crate::features::products::dtos::ProductResponseDto;
use crate::shared::constants::CATEGORY_NAME_MAX_LENGTH;
use crate::shared::validation::{trimmed_or_none, FieldErrors, JsonBody, JsonField, JsonKind};

/// Request DTO for creating a category
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    /// Display name; the slug is derived from it
    #[serde(default)]
    #[validate(length(
        max = CATEGORY_NAME_MAX_LENGTH,
        message = "Name must not exceed 100 characters"
    ))]
    pub name: String,

    /// Optional description; its maximum length is configured per deployment
    #[serde(default)]
    pub description: Option<String>,
}

impl JsonBody for CreateCategoryDto {
    const FIELDS: &'static [JsonField] = &[
        JsonField::new("name", JsonKind::String),
        JsonField::new("description", JsonKind::String).nullable(),
    ];
}

/// Validated, trimmed category input
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCategoryPayload {
    pub name: String,
    pub description: Option<String>,
}

impl CreateCategoryDto {
    /// Trim, check every rule and report all failing fields at once.
    pub fn validated(self, description_max_length: usize) -> Result<CreateCategoryPayload, AppError> {
        let trimmed = Self {
            name: self.name.trim().to_string(),
            description: trimmed_or_none(self.description),
        };

        let mut errors = match trimmed.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => e.into(),
        };

        if trimmed.name.is_empty() {
            errors.add("name", "Name is required");
        }

        if let Some(description) = &trimmed.description {
            if description.chars().count() > description_max_length {
                errors.add(
                    "description",
                    format!(
                        "Description must not exceed {} characters",
                        description_max_length
                    ),
                );
            }
        }

        errors.into_result()?;

        Ok(CreateCategoryPayload {
            name: trimmed.name,
            description: trimmed.description,
        })
    }
}

/// Response DTO for category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            active: c.active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// List item: only what the category table needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryListItemDto {
    pub id: Uuid,
    pub name: String,
}

impl From<Category> for CategoryListItemDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

/// Category with its products, newest first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetailDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub products: Vec<ProductResponseDto>,
}

impl CategoryDetailDto {
    pub fn new(category: Category, products: Vec<ProductResponseDto>) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            description: category.description,
            active: category.active,
            created_at: category.created_at,
            updated_at: category.updated_at,
            products,
        }
    }
}

/// Category reference embedded in product responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategorySummaryDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<CategorySummary> for CategorySummaryDto {
    fn from(c: CategorySummary) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str, description: Option<&str>) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            description: description.map(str::to_string),
        }
    }

    fn field_errors(result: Result<CreateCategoryPayload, AppError>) -> FieldErrors {
        match result {
            Err(AppError::Validation(fields)) => fields,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_payload_is_trimmed() {
        let payload = dto("  Garden  ", Some("  Tools  ")).validated(20).unwrap();
        assert_eq!(payload.name, "Garden");
        assert_eq!(payload.description.as_deref(), Some("Tools"));
    }

    #[test]
    fn test_blank_description_becomes_none() {
        let payload = dto("Garden", Some("   ")).validated(20).unwrap();
        assert_eq!(payload.description, None);
    }

    #[test]
    fn test_blank_name_is_required() {
        let errors = field_errors(dto("   ", None).validated(20));
        assert_eq!(errors.get("name"), Some(&["Name is required".to_string()][..]));
    }

    #[test]
    fn test_name_too_long() {
        let errors = field_errors(dto(&"x".repeat(101), None).validated(20));
        assert!(errors.get("name").is_some());
        assert!(dto(&"x".repeat(100), None).validated(20).is_ok());
    }

    #[test]
    fn test_description_limit_is_configurable() {
        let description = "a description longer than twenty";
        let errors = field_errors(dto("Garden", Some(description)).validated(20));
        assert_eq!(
            errors.get("description"),
            Some(&["Description must not exceed 20 characters".to_string()][..])
        );

        assert!(dto("Garden", Some(description)).validated(255).is_ok());
    }

    #[test]
    fn test_reports_all_fields_at_once() {
        let errors = field_errors(dto("", Some(&"d".repeat(21))).validated(20));
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["description", "name"]);
    }

    #[test]
    fn test_wrong_types_are_field_errors() {
        let err = CreateCategoryDto::from_json(serde_json::json!({ "name": 42, "description": true }))
            .unwrap_err();
        let errors = field_errors(Err(err));
        assert_eq!(errors.get("name"), Some(&["Expected a string".to_string()][..]));
        assert_eq!(
            errors.get("description"),
            Some(&["Expected a string".to_string()][..])
        );
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let parsed: CreateCategoryDto = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.description, None);
    }
}
