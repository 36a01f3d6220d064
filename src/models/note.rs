//! Note model representing a paid study note in the catalog.

use super::wire;
use crate::search::record::non_blank;
use crate::search::SearchRecord;
use serde::{Deserialize, Serialize};

/// A study note listed for sale.
///
/// Deserializes from a `notes` row. When the row is fetched with the
/// current user's embedded `purchases`, `is_purchased` reflects whether
/// any purchase came back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Note {
    /// Unique identifier for the note
    #[serde(deserialize_with = "wire::string_or_number")]
    pub id: String,

    /// Display title
    #[serde(deserialize_with = "wire::null_as_empty")]
    pub name: String,

    #[serde(deserialize_with = "wire::null_as_empty")]
    pub subject: String,

    #[serde(deserialize_with = "wire::null_as_empty")]
    pub branch: String,

    /// Study year (stored as text, sometimes sent as a number)
    #[serde(deserialize_with = "wire::string_or_number")]
    pub year: String,

    #[serde(deserialize_with = "wire::string_or_number")]
    pub semester: String,

    /// Listing price in rupees
    #[serde(deserialize_with = "wire::number_or_zero")]
    pub price: f64,

    /// PDF locations (API field: pdfUrl, a single URL or a list)
    #[serde(rename(deserialize = "pdfUrl"), deserialize_with = "wire::one_or_many")]
    pub pdf_urls: Vec<String>,

    /// Whether the configured user bought this note (API field: purchases)
    #[serde(rename(deserialize = "purchases"), deserialize_with = "wire::has_rows")]
    pub is_purchased: bool,

    /// When the note was listed (ISO 8601 timestamp) (API field: createdAt)
    #[serde(
        rename(deserialize = "createdAt"),
        alias = "created_at",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Note {
    /// Create a new note with the searchable fields set.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        subject: impl Into<String>,
        branch: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subject: subject.into(),
            branch: branch.into(),
            year: year.into(),
            ..Default::default()
        }
    }
}

impl SearchRecord for Note {
    const KIND: &'static str = "note";
    const FIELDS: &'static [&'static str] = &["name", "subject", "branch", "year", "semester"];

    fn record_id(&self) -> &str {
        &self.id
    }

    fn field_text(&self, field: &str) -> Option<&str> {
        match field {
            "name" => non_blank(&self.name),
            "subject" => non_blank(&self.subject),
            "branch" => non_blank(&self.branch),
            "year" => non_blank(&self.year),
            "semester" => non_blank(&self.semester),
            _ => None,
        }
    }
}
