//! RecordId value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Longest catalog row id accepted, in bytes.
const MAX_ID_LEN: usize = 100;

/// A validated catalog row identifier.
///
/// # Example
///
/// ```
/// use study_catalog_mcp::domain::RecordId;
///
/// let id = RecordId::new(" note-42 ").unwrap();
/// assert_eq!(id.as_str(), "note-42");
/// assert!(RecordId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Create a new RecordId from trimmed input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` for blank input and
    /// `ValidationError::IdTooLong` past 100 bytes.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ValidationError> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if id.len() > MAX_ID_LEN {
            return Err(ValidationError::IdTooLong(id.len()));
        }
        Ok(Self(id.to_string()))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecordId::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_valid() {
        let id = RecordId::new("3f1c-note").unwrap();
        assert_eq!(id.as_str(), "3f1c-note");
        assert_eq!(id.to_string(), "3f1c-note");
    }

    #[test]
    fn test_record_id_rejects_empty() {
        assert_eq!(RecordId::new(""), Err(ValidationError::EmptyId));
        assert_eq!(RecordId::new("   "), Err(ValidationError::EmptyId));
    }

    #[test]
    fn test_record_id_rejects_long() {
        let long = "x".repeat(101);
        assert_eq!(RecordId::new(&long), Err(ValidationError::IdTooLong(101)));
    }

    #[test]
    fn test_record_id_deserialization_empty_fails() {
        let result: Result<RecordId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());

        let id: RecordId = serde_json::from_str("\"pyq-7\"").unwrap();
        assert_eq!(id.as_str(), "pyq-7");
    }
}
