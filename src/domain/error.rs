//! Typed domain errors.
//!
//! Services return `anyhow::Result`; failures that callers may want to branch
//! on are raised as `DomainError` so they stay downcastable. Plain absence on
//! a lookup is not an error and is reported as `None` instead.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A mutation referenced an id that does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// A raw form value failed to parse or violated a field constraint.
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    /// A request was structurally incomplete, e.g. a measurement without
    /// either weight or length.
    #[error("{0}")]
    Incomplete(&'static str),
}

impl DomainError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}
