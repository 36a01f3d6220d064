//! The record shape a [`SearchIndex`](super::SearchIndex) reads from.

/// A catalog row that can be searched by field name.
///
/// `FIELDS` is the static schema: every name `field_text` understands.
/// Index construction rejects configured names outside it, while a record
/// returning `None` for a known field is simply skipped for that field.
pub trait SearchRecord {
    /// Record kind used in error messages (e.g. "note").
    const KIND: &'static str;

    /// Every searchable field name of this record type.
    const FIELDS: &'static [&'static str];

    /// Stable identifier of the record.
    fn record_id(&self) -> &str;

    /// Text of a field, or `None` when this record has no value for it.
    fn field_text(&self, field: &str) -> Option<&str>;
}

/// Treat blank strings coming off the wire as absent values.
pub(crate) fn non_blank(text: &str) -> Option<&str> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
