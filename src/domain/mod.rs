//! Domain value objects and types.
//!
//! Type-safe wrappers for catalog record ids and search queries. They
//! validate at construction time so handlers never pass raw strings deeper.

pub mod errors;
pub mod query;
pub mod record_id;

pub use errors::ValidationError;
pub use query::{fold_text, SearchQuery, MAX_QUERY_CHARS};
pub use record_id::RecordId;
