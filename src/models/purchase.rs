//! Purchase records and the flattened purchased-note listing row.

use super::note::Note;
use super::wire;
use crate::search::record::non_blank;
use crate::search::SearchRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A purchase row with its embedded note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Purchase {
    #[serde(deserialize_with = "wire::string_or_number")]
    pub id: String,

    #[serde(deserialize_with = "wire::string_or_number")]
    pub user_id: String,

    #[serde(deserialize_with = "wire::string_or_number")]
    pub note_id: String,

    /// Price paid at purchase time
    #[serde(deserialize_with = "wire::number_or_zero")]
    pub purchase_price: f64,

    /// ISO 8601 timestamp of the purchase
    #[serde(deserialize_with = "wire::null_as_empty")]
    pub created_at: String,

    /// The purchased note (API field: notes); `None` if it was deleted
    #[serde(rename = "notes")]
    pub note: Option<Note>,
}

/// One entry of the "my purchases" listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PurchasedNote {
    /// The note's id, not the purchase's
    pub id: String,
    pub name: String,
    pub subject: String,
    pub branch: String,
    pub year: String,
    pub semester: String,
    pub purchase_price: f64,
    /// Human-readable date, e.g. "Jan 5, 2024"
    pub purchase_date: String,
    pub pdf_urls: Vec<String>,
}

impl PurchasedNote {
    /// Flatten a purchase into a listing row.
    ///
    /// Returns `None` when the purchase no longer has a note attached.
    pub fn from_purchase(purchase: Purchase) -> Option<Self> {
        let note = purchase.note?;
        Some(Self {
            id: note.id,
            name: note.name,
            subject: note.subject,
            branch: note.branch,
            year: note.year,
            semester: note.semester,
            purchase_price: purchase.purchase_price,
            purchase_date: format_purchase_date(&purchase.created_at),
            pdf_urls: note.pdf_urls,
        })
    }
}

impl SearchRecord for PurchasedNote {
    const KIND: &'static str = "purchased note";
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

/// Format a backend timestamp as `Mon D, YYYY` in UTC.
///
/// Unparseable input is returned unchanged.
pub fn format_purchase_date(raw: &str) -> String {
    const DISPLAY: &str = "%b %-d, %Y";
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Utc).format(DISPLAY).to_string();
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return ts.format(DISPLAY).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(DISPLAY).to_string();
    }
    raw.to_string()
}
