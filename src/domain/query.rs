//! SearchQuery value object and the shared text folding rules.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"));

/// Longest query accepted at the service boundary, in characters.
pub const MAX_QUERY_CHARS: usize = 500;

/// Case-fold text and collapse whitespace runs into single spaces.
///
/// Each char is upper-cased before lower-casing so special-casing letters
/// fold with their expansions ("ß", "SS" and "ss" all become "ss").
/// Queries and indexed field text go through the same folding, so
/// comparisons in the matcher are plain `char` equality.
pub fn fold_text(text: &str) -> String {
    WHITESPACE_RUN
        .replace_all(text.trim(), " ")
        .chars()
        .flat_map(char::to_uppercase)
        .flat_map(char::to_lowercase)
        .collect()
}

/// A normalized search query.
///
/// An empty query is the "no filter" sentinel: searching with it returns
/// every record in its original order.
///
/// # Example
///
/// ```
/// use study_catalog_mcp::domain::SearchQuery;
///
/// let query = SearchQuery::parse("  Data   SYS ");
/// assert_eq!(query.as_str(), "data sys");
/// assert_eq!(query.terms().count(), 2);
/// assert!(SearchQuery::parse("   ").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SearchQuery {
    raw: String,
    folded: String,
}

impl SearchQuery {
    /// Normalize a raw query. Never fails.
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.trim().to_string(),
            folded: fold_text(raw),
        }
    }

    /// Normalize a raw query, rejecting ones longer than [`MAX_QUERY_CHARS`].
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::QueryTooLong` for oversized input.
    pub fn validate(raw: &str) -> Result<Self, ValidationError> {
        let len = raw.trim().chars().count();
        if len > MAX_QUERY_CHARS {
            return Err(ValidationError::QueryTooLong {
                len,
                max: MAX_QUERY_CHARS,
            });
        }
        Ok(Self::parse(raw))
    }

    /// True when the query is empty after trimming.
    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// The folded query text.
    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// The trimmed query as the user typed it, for display.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whitespace separated terms of the folded query.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.folded.split(' ').filter(|t| !t.is_empty())
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
