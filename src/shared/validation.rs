use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{ValidateUrl, ValidationErrors};

use crate::core::error::AppError;

lazy_static! {
    /// Regex for a well-formed slug
    /// Must be lowercase alphanumeric with single hyphens between segments
    /// - Valid: "home-garden", "4k-tvs", "books"
    /// - Invalid: "-books", "books-", "books--comics", "Books", "books_comics"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Per-field validation messages keyed by the JSON field name.
///
/// Serialized as `{ "field": ["message", ...] }` under `details` in the error
/// envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(to_camel_case(field))
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded, otherwise a validation condition.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                fields.add(&field, message);
            }
        }
        fields
    }
}

/// Validator reports Rust field names; the API speaks camelCase.
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// JSON type a request field must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    String,
    Number,
    Boolean,
}

impl JsonKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            JsonKind::String => value.is_string(),
            JsonKind::Number => value.is_number(),
            JsonKind::Boolean => value.is_boolean(),
        }
    }

    fn message(self) -> &'static str {
        match self {
            JsonKind::String => "Expected a string",
            JsonKind::Number => "Expected a number",
            JsonKind::Boolean => "Expected a boolean",
        }
    }
}

/// Declared shape of one request body field, keyed by its JSON name
#[derive(Debug, Clone, Copy)]
pub struct JsonField {
    name: &'static str,
    kind: JsonKind,
    nullable: bool,
}

impl JsonField {
    pub const fn new(name: &'static str, kind: JsonKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
        }
    }

    /// `null` is accepted and treated as absent
    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }
}

/// Report every declared field whose JSON value has the wrong type.
///
/// Absent fields pass; the DTO rules decide whether they are required.
pub fn check_json_types(body: &Value, fields: &[JsonField]) -> Result<(), AppError> {
    let object = body
        .as_object()
        .ok_or_else(|| AppError::BadRequest("Request body must be a JSON object".to_string()))?;

    let mut errors = FieldErrors::new();
    for field in fields {
        match object.get(field.name) {
            None => {}
            Some(Value::Null) if field.nullable => {}
            Some(value) if field.kind.matches(value) => {}
            Some(_) => errors.add(field.name, field.kind.message()),
        }
    }
    errors.into_result()
}

/// Request DTO decoded from an untyped JSON body.
///
/// Type mismatches become per-field validation errors instead of a bare
/// body rejection.
pub trait JsonBody: DeserializeOwned {
    const FIELDS: &'static [JsonField];

    fn from_json(body: Value) -> Result<Self, AppError> {
        check_json_types(&body, Self::FIELDS)?;
        serde_json::from_value(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON data: {}", e)))
    }
}

/// Trim in place and collapse an all-whitespace value to `None`.
pub fn trimmed_or_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Absolute URL, or the empty string meaning "no value".
pub fn is_url_or_empty(value: &str) -> bool {
    value.is_empty() || value.validate_url()
}

/// UUID string, or the empty string meaning "no reference".
pub fn parse_uuid_or_empty(value: &str) -> Result<Option<Uuid>, uuid::Error> {
    if value.is_empty() {
        Ok(None)
    } else {
        Uuid::parse_str(value).map(Some)
    }
}

/// Path ids that are not UUIDs cannot match any row, so they are reported as
/// missing rather than malformed.
pub fn parse_path_id(raw: &str, not_found: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(not_found.to_string()))
}
