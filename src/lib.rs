//! Study Catalog MCP Server - typo-tolerant search over a study-materials catalog.
//!
//! The server exposes notes, previous-year question papers (PYQs), question
//! banks and a user's purchased notes to AI assistants. Every catalog is
//! fetched from a PostgREST backend, indexed once per snapshot and searched
//! with a multi-field approximate matcher.
//!
//! # Architecture
//!
//! - **search**: The multi-field approximate search index
//! - **models**: Catalog records and their searchable fields
//! - **domain**: Validated query and id types
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **client**: HTTP client for the catalog backend
//! - **repositories**: Per-table data access over the client
//! - **cache**: TTL snapshot cache holding built indexes
//! - **tools**: Per-catalog listing, filtering and facets
//! - **services**: Request validation and routing
//! - **server**: MCP protocol server

pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod search;
pub mod server;
pub mod services;
pub mod tools;

// Re-export commonly used types
pub use cache::{CatalogSnapshot, SnapshotCache};
pub use client::CatalogClient;
pub use config::Config;
pub use domain::{RecordId, SearchQuery, ValidationError};
pub use error::{CatalogApiError, ConfigError, SearchError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{Note, Purchase, PurchasedNote, Pyq, QuestionBank, UserInfo};
pub use search::{FieldMatch, MatchKind, MatchScore, ScoredMatch, SearchIndex, SearchRecord};
pub use server::CatalogMcpServer;
pub use services::{CatalogService, CatalogServiceImpl, CatalogSettings, SearchRequest};
pub use tools::{
    CatalogFilter, CatalogHit, CatalogKind, CatalogQuery, CatalogResponse, CatalogTools, Facets,
    ListingState,
};
