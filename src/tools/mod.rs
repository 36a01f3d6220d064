//! Catalog listing tools.
//!
//! One generic [`CatalogTools`] serves every catalog; [`RecordSource`]
//! implementations supply each catalog's records.

pub mod catalog;
pub mod source;

pub use catalog::{
    CatalogFilter, CatalogHit, CatalogKind, CatalogQuery, CatalogResponse, CatalogTools, Facets,
    ListingState, DEFAULT_SEARCH_FIELDS,
};
pub use source::{NoteSource, PurchasedNoteSource, PyqSource, QuestionBankSource, RecordSource};
