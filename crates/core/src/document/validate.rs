//! Document validation utilities.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("`{0}` is required")]
    Missing(&'static str),
    #[error("`{0}` cannot be empty")]
    Empty(&'static str),
    #[error("`type` must be one of `windows`, `doors` (got `{0}`)")]
    InvalidCategoryType(String),
    #[error("duplicate category id `{0}`")]
    DuplicateCategoryId(String),
    #[error("{path}: {source}")]
    Nested {
        path: String,
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Prefix the error with the location of the offending element, e.g. `products[2]`.
    pub fn at(self, path: impl Into<String>) -> Self {
        ValidationError::Nested {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Require a present, non-blank string field.
pub fn required_field(
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::Missing(field)),
        Some(value) if value.trim().is_empty() => Err(ValidationError::Empty(field)),
        Some(value) => Ok(value),
    }
}
