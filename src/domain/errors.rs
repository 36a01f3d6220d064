//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    EmptyId,

    /// The provided ID exceeds the accepted length.
    IdTooLong(usize),

    /// The search query exceeds the accepted length.
    QueryTooLong { len: usize, max: usize },

    /// The requested result limit is outside the accepted range.
    InvalidLimit(usize),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ID cannot be empty"),
            Self::IdTooLong(len) => write!(f, "ID too long ({} characters)", len),
            Self::QueryTooLong { len, max } => {
                write!(f, "Search query too long ({} characters, max {})", len, max)
            }
            Self::InvalidLimit(limit) => write!(f, "Invalid result limit: {}", limit),
        }
    }
}

impl std::error::Error for ValidationError {}
