//! Domain error model.

use thiserror::Error;

/// Result type used across the record layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, client-side failures (validation,
/// coercion, identifiers). Transport concerns belong to `tradedesk-client`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. mismatched passwords).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A required form field was empty after trimming.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A numeric form field could not be coerced.
    #[error("invalid number for '{field}': {value:?}")]
    InvalidNumber { field: String, value: String },

    /// A date could not be parsed.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// A value is outside the allowed set for an enumerated field.
    #[error("invalid value for '{field}': {value:?}")]
    InvalidChoice { field: String, value: String },

    /// A draft was addressed with a field name it does not have.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// An identifier was invalid.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested record was not found locally.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate(value.into())
    }

    pub fn invalid_choice(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidChoice {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField(field.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Whether this error stems from an incomplete form.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField(_))
    }
}
