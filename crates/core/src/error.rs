//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic input failures live here. Uniqueness and storage
/// failures depend on the store and are modelled in the infra layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. an empty title).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. empty).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => msg,
        }
    }
}
