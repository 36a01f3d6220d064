//! HTTP client for the catalog backend's REST API.
//!
//! The backend exposes its tables through a PostgREST endpoint under
//! `/rest/v1`. This client is synchronous; async callers go through
//! [`AsyncCatalogClientImpl`], which moves each call onto
//! `tokio::task::spawn_blocking`.

mod async_wrapper;
pub use async_wrapper::{AsyncCatalogClient, AsyncCatalogClientImpl};

use crate::config::Config;
use crate::error::{CatalogApiError, CatalogApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{Note, Purchase, Pyq, QuestionBank, UserInfo};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Columns of the note embedded in each purchase row.
const PURCHASED_NOTE_COLUMNS: &str = "id,name,subject,branch,year,semester,price,pdfUrl";

/// HTTP client for the catalog backend.
#[derive(Clone)]
pub struct CatalogClient {
    /// Project base URL, without the `/rest/v1` suffix
    base_url: String,

    /// API key for authentication
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl CatalogClient {
    /// Create a new CatalogClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a CatalogClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full REST URL from a table path and query string.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/rest/v1/{}", base, path)
    }

    /// Execute a GET request with authentication.
    fn get(&self, path: &str) -> CatalogApiResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);
        tracing::debug!("GET {}", url);

        let result = self
            .agent
            .get(&url)
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Accept", "application/json")
            .call()
            .map_err(|e| self.map_error(e));

        match &result {
            Ok(_) => timer.complete(),
            Err(e) => {
                tracing::warn!("GET {} failed: {}", url, e);
                timer.complete_with_error();
            }
        }

        result
    }

    /// GET a path and decode the JSON array of rows.
    fn get_rows<T: DeserializeOwned>(&self, path: &str) -> CatalogApiResult<Vec<T>> {
        let response = self.get(path)?;
        let body = response
            .into_string()
            .map_err(|e| CatalogApiError::HttpError(e.to_string()))?;

        let rows: Vec<T> = serde_json::from_str(&body)?;
        self.metrics.record_rows_fetched(rows.len());
        Ok(rows)
    }

    /// GET a path expected to return at most one row.
    fn get_single<T: DeserializeOwned>(&self, path: &str, what: &str) -> CatalogApiResult<T> {
        self.get_rows(path)?
            .into_iter()
            .next()
            .ok_or_else(|| CatalogApiError::NotFound(what.to_string()))
    }

    /// Map a ureq error to a CatalogApiError.
    fn map_error(&self, error: ureq::Error) -> CatalogApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => CatalogApiError::Unauthorized,
                    404 => CatalogApiError::NotFound(message),
                    429 => CatalogApiError::RateLimitExceeded,
                    _ => CatalogApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => match transport.kind() {
                ureq::ErrorKind::ConnectionFailed => {
                    CatalogApiError::HttpError("Connection failed".to_string())
                }
                ureq::ErrorKind::Io => CatalogApiError::Timeout,
                _ => CatalogApiError::HttpError(transport.to_string()),
            },
        }
    }

    // ========================= Catalog Listings =========================

    /// List every note, newest first.
    ///
    /// With a user id, each note embeds that user's purchases so
    /// `is_purchased` can be derived.
    pub fn get_notes(&self, user_id: Option<&str>) -> CatalogApiResult<Vec<Note>> {
        self.get_rows(&notes_path(user_id))
    }

    /// Get a single note by ID.
    pub fn get_note(&self, note_id: &str) -> CatalogApiResult<Note> {
        let path = format!("notes?select=*&id=eq.{}", urlencoding::encode(note_id));
        self.get_single(&path, &format!("note {}", note_id))
    }

    /// List every previous-year paper, newest first.
    pub fn get_pyqs(&self) -> CatalogApiResult<Vec<Pyq>> {
        self.get_rows("pyqs?select=*&order=createdAt.desc")
    }

    /// List every question bank, newest first.
    pub fn get_question_banks(&self) -> CatalogApiResult<Vec<QuestionBank>> {
        self.get_rows("question_banks?select=*&order=createdAt.desc")
    }

    /// List a user's purchases with the purchased notes embedded, newest first.
    pub fn get_purchases_with_notes(&self, user_id: &str) -> CatalogApiResult<Vec<Purchase>> {
        let path = format!(
            "purchases?select=*,notes({})&user_id=eq.{}&order=created_at.desc",
            PURCHASED_NOTE_COLUMNS,
            urlencoding::encode(user_id)
        );
        self.get_rows(&path)
    }

    /// Get a user's profile row.
    pub fn get_user_info(&self, user_id: &str) -> CatalogApiResult<UserInfo> {
        let path = format!("user_info?select=*&id=eq.{}", urlencoding::encode(user_id));
        self.get_single(&path, &format!("user {}", user_id))
    }
}

fn notes_path(user_id: Option<&str>) -> String {
    match user_id {
        Some(user_id) => format!(
            "notes?select=*,purchases!left(id)&purchases.user_id=eq.{}&order=createdAt.desc",
            urlencoding::encode(user_id)
        ),
        None => "notes?select=*&order=createdAt.desc".to_string(),
    }
}
