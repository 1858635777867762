use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields written on insert; id and timestamps come from the database
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// The slice of a category embedded in product responses
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<&Category> for CategorySummary {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            slug: c.slug.clone(),
        }
    }
}
