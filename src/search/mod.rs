//! Approximate multi-field search over catalog records.
//!
//! One generic index serves every catalog: it is parameterized by the
//! record type and the fields to search, and returns references into the
//! record list it was built from.

pub mod index;
pub mod record;
pub mod scoring;

pub use index::{FieldMatch, ScoredMatch, SearchIndex};
pub use record::SearchRecord;
pub use scoring::{MatchKind, MatchScore};
