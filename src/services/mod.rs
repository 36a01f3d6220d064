//! Service layer for business logic.
//!
//! Services validate tool input and coordinate the catalog listing tools
//! and repositories.

pub mod catalog_service;

pub use catalog_service::{
    CatalogService, CatalogServiceImpl, CatalogSettings, RefreshSummary, SearchRequest,
};
