//! Catalog service layer.
//!
//! Validates requests and routes them to the per-catalog listing tools.

use crate::config::{Config, MAX_RESULT_LIMIT};
use crate::domain::{RecordId, SearchQuery, ValidationError};
use crate::error::{CatalogApiError, CatalogApiResult, SearchResult};
use crate::metrics::Metrics;
use crate::models::{Note, PurchasedNote, Pyq, QuestionBank, UserInfo};
use crate::repositories::{NoteRepository, Repositories, UserInfoRepository};
use crate::tools::{
    CatalogFilter, CatalogKind, CatalogQuery, CatalogResponse, CatalogTools, Facets, NoteSource,
    PurchasedNoteSource, PyqSource, QuestionBankSource, DEFAULT_SEARCH_FIELDS,
};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// A search request as it arrives from a tool call.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub query: String,
    pub subject: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
    pub semester: Option<String>,
    pub limit: Option<usize>,
}

impl SearchRequest {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

/// Record counts after a full refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshSummary {
    pub notes: usize,
    pub pyqs: usize,
    pub question_banks: usize,
    /// `None` when no user is configured
    pub purchased_notes: Option<usize>,
}

/// Settings the service takes from [`Config`].
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub user_id: Option<String>,
    pub cache_ttl_secs: u64,
    pub max_results: usize,
}

impl From<&Config> for CatalogSettings {
    fn from(config: &Config) -> Self {
        Self {
            user_id: config.user_id.clone(),
            cache_ttl_secs: config.cache_ttl_secs,
            max_results: config.max_search_results,
        }
    }
}

/// Catalog service trait for business operations.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn search_notes(&self, request: SearchRequest) -> CatalogApiResult<CatalogResponse<Note>>;

    async fn search_pyqs(&self, request: SearchRequest) -> CatalogApiResult<CatalogResponse<Pyq>>;

    async fn search_question_banks(
        &self,
        request: SearchRequest,
    ) -> CatalogApiResult<CatalogResponse<QuestionBank>>;

    /// Search the configured user's purchased notes.
    async fn search_purchased_notes(
        &self,
        request: SearchRequest,
    ) -> CatalogApiResult<CatalogResponse<PurchasedNote>>;

    /// Get complete details for a note.
    async fn get_note(&self, note_id: &str) -> CatalogApiResult<Note>;

    /// Distinct facet values of one catalog.
    async fn facets(&self, kind: CatalogKind) -> CatalogApiResult<Facets>;

    /// Profile of the configured user.
    async fn get_user_info(&self) -> CatalogApiResult<UserInfo>;

    /// Drop every snapshot and refetch the catalogs.
    async fn refresh_all(&self) -> CatalogApiResult<RefreshSummary>;
}

/// Default implementation of CatalogService.
pub struct CatalogServiceImpl {
    notes: CatalogTools<Note>,
    pyqs: CatalogTools<Pyq>,
    question_banks: CatalogTools<QuestionBank>,
    purchases: CatalogTools<PurchasedNote>,
    note_repo: Arc<dyn NoteRepository>,
    user_info_repo: Arc<dyn UserInfoRepository>,
    user_id: Option<String>,
}

/// Validation helper functions.
impl CatalogServiceImpl {
    fn validate_search(request: &SearchRequest) -> Result<(), ValidationError> {
        SearchQuery::validate(&request.query)?;
        if let Some(limit) = request.limit {
            if limit == 0 || limit > MAX_RESULT_LIMIT {
                return Err(ValidationError::InvalidLimit(limit));
            }
        }
        Ok(())
    }

    fn catalog_query(request: SearchRequest) -> CatalogApiResult<CatalogQuery> {
        Self::validate_search(&request).map_err(invalid)?;
        Ok(CatalogQuery {
            text: request.query,
            filter: CatalogFilter {
                subject: request.subject,
                branch: request.branch,
                year: request.year,
                semester: request.semester,
            },
            limit: request.limit,
        })
    }

    fn require_user(&self) -> CatalogApiResult<&str> {
        self.user_id.as_deref().ok_or_else(|| {
            CatalogApiError::InvalidRequest(
                "No user configured; set CATALOG_USER_ID".to_string(),
            )
        })
    }
}

impl CatalogServiceImpl {
    /// Build the service and one listing tool per catalog.
    ///
    /// # Errors
    ///
    /// Fails if the default search fields do not fit a record type.
    pub fn new(
        repos: Repositories,
        settings: CatalogSettings,
        metrics: Metrics,
    ) -> SearchResult<Self> {
        let ttl = settings.cache_ttl_secs;
        let user_id = settings.user_id.clone();

        let notes = CatalogTools::new(
            CatalogKind::Notes,
            Arc::new(NoteSource::new(repos.notes.clone(), user_id.clone())),
            ttl,
        );
        let pyqs = CatalogTools::new(
            CatalogKind::Pyqs,
            Arc::new(PyqSource::new(repos.pyqs.clone())),
            ttl,
        );
        let question_banks = CatalogTools::new(
            CatalogKind::QuestionBanks,
            Arc::new(QuestionBankSource::new(repos.question_banks.clone())),
            ttl,
        );
        let purchases = CatalogTools::new(
            CatalogKind::Purchases,
            Arc::new(PurchasedNoteSource::new(repos.purchases.clone(), user_id.clone())),
            ttl,
        );

        // A bad field list fails at startup, not on first search
        let fields = DEFAULT_SEARCH_FIELDS;
        let limit = settings.max_results;

        Ok(Self {
            notes: notes
                .with_fields(fields)?
                .with_default_limit(limit)
                .with_metrics(metrics.clone()),
            pyqs: pyqs
                .with_fields(fields)?
                .with_default_limit(limit)
                .with_metrics(metrics.clone()),
            question_banks: question_banks
                .with_fields(fields)?
                .with_default_limit(limit)
                .with_metrics(metrics.clone()),
            purchases: purchases
                .with_fields(fields)?
                .with_default_limit(limit)
                .with_metrics(metrics),
            note_repo: repos.notes,
            user_info_repo: repos.user_info,
            user_id,
        })
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn search_notes(&self, request: SearchRequest) -> CatalogApiResult<CatalogResponse<Note>> {
        self.notes.search(Self::catalog_query(request)?).await
    }

    async fn search_pyqs(&self, request: SearchRequest) -> CatalogApiResult<CatalogResponse<Pyq>> {
        self.pyqs.search(Self::catalog_query(request)?).await
    }

    async fn search_question_banks(
        &self,
        request: SearchRequest,
    ) -> CatalogApiResult<CatalogResponse<QuestionBank>> {
        self.question_banks
            .search(Self::catalog_query(request)?)
            .await
    }

    async fn search_purchased_notes(
        &self,
        request: SearchRequest,
    ) -> CatalogApiResult<CatalogResponse<PurchasedNote>> {
        self.require_user()?;
        self.purchases.search(Self::catalog_query(request)?).await
    }

    async fn get_note(&self, note_id: &str) -> CatalogApiResult<Note> {
        let id = RecordId::new(note_id).map_err(invalid)?;

        match self.notes.get(id.as_str()).await {
            Err(CatalogApiError::NotFound(_)) => {
                // Listed after the snapshot was taken
                tracing::debug!(note_id = %id, "Note not in snapshot, fetching directly");
                self.note_repo.get(id.as_str()).await
            }
            other => other,
        }
    }

    async fn facets(&self, kind: CatalogKind) -> CatalogApiResult<Facets> {
        match kind {
            CatalogKind::Notes => self.notes.facets().await,
            CatalogKind::Pyqs => self.pyqs.facets().await,
            CatalogKind::QuestionBanks => self.question_banks.facets().await,
            CatalogKind::Purchases => {
                self.require_user()?;
                self.purchases.facets().await
            }
        }
    }

    async fn get_user_info(&self) -> CatalogApiResult<UserInfo> {
        let user_id = self.require_user()?;
        self.user_info_repo.get(user_id).await
    }

    async fn refresh_all(&self) -> CatalogApiResult<RefreshSummary> {
        self.notes.invalidate();
        self.pyqs.invalidate();
        self.question_banks.invalidate();
        self.purchases.invalidate();

        let (notes, pyqs, question_banks) = futures::try_join!(
            self.notes.warm(),
            self.pyqs.warm(),
            self.question_banks.warm(),
        )?;

        let purchased_notes = match self.user_id {
            Some(_) => Some(self.purchases.warm().await?),
            None => None,
        };

        tracing::info!(
            notes,
            pyqs,
            question_banks,
            purchased_notes = ?purchased_notes,
            "Catalog refreshed"
        );

        Ok(RefreshSummary {
            notes,
            pyqs,
            question_banks,
            purchased_notes,
        })
    }
}

fn invalid(e: ValidationError) -> CatalogApiError {
    CatalogApiError::InvalidRequest(e.to_string())
}
