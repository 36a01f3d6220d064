//! Previous-year question paper model.

use super::wire;
use crate::search::record::non_blank;
use crate::search::SearchRecord;
use serde::{Deserialize, Serialize};

/// A previous-year question paper (PYQ). Free to read, one PDF each.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Pyq {
    #[serde(deserialize_with = "wire::string_or_number")]
    pub id: String,

    #[serde(deserialize_with = "wire::null_as_empty")]
    pub name: String,

    #[serde(deserialize_with = "wire::null_as_empty")]
    pub subject: String,

    #[serde(deserialize_with = "wire::null_as_empty")]
    pub branch: String,

    #[serde(deserialize_with = "wire::string_or_number")]
    pub year: String,

    #[serde(deserialize_with = "wire::string_or_number")]
    pub semester: String,

    /// PDF location (API field: pdfUrl)
    #[serde(rename(deserialize = "pdfUrl"), skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,

    /// (API field: createdAt)
    #[serde(
        rename(deserialize = "createdAt"),
        alias = "created_at",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
}

impl SearchRecord for Pyq {
    const KIND: &'static str = "pyq";
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
