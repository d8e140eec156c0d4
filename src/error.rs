//! Error types for bookstore operations.

use thiserror::Error;

/// Main error type for the bookstore backend.
///
/// Storage failures from every backend are folded into [`Storage`] so the
/// domain layer sees one taxonomy regardless of which backend is wired in.
///
/// [`Storage`]: BookstoreError::Storage
#[derive(Debug, Error)]
pub enum BookstoreError {
    /// An entity failed one or more structural invariants. The message
    /// carries every violated rule, not just the first one found.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A purchase write referenced a client or book id that does not
    /// resolve to a stored entity.
    #[error("invalid book id and/or client id")]
    InvalidReference,

    /// Programmer error: an unassigned (nil) id reached a repository
    /// operation. Fails fast, nothing is read or written.
    #[error("illegal argument: {0}")]
    IllegalArgument(&'static str),

    /// An underlying I/O, parse, or database failure, wrapping the
    /// original cause's description.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type alias for bookstore operations.
pub type Result<T> = std::result::Result<T, BookstoreError>;

impl BookstoreError {
    /// Check if error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if error is a referential-integrity error
    pub fn is_invalid_reference(&self) -> bool {
        matches!(self, Self::InvalidReference)
    }

    /// Check if error is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<std::io::Error> for BookstoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<csv::Error> for BookstoreError {
    fn from(err: csv::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<quick_xml::Error> for BookstoreError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<rusqlite::Error> for BookstoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<r2d2::Error> for BookstoreError {
    fn from(err: r2d2::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_yaml::Error> for BookstoreError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
