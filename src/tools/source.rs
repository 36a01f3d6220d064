//! Record sources: how each catalog fetches its full record list.

use crate::error::{CatalogApiError, CatalogApiResult};
use crate::models::{Note, PurchasedNote, Pyq, QuestionBank};
use crate::repositories::{
    NoteRepository, PurchaseRepository, PyqRepository, QuestionBankRepository,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Fetches every record of one catalog.
#[async_trait]
pub trait RecordSource<R: Send + 'static>: Send + Sync {
    async fn fetch_all(&self) -> CatalogApiResult<Vec<R>>;
}

/// All notes, with purchase status for the configured user.
pub struct NoteSource {
    repo: Arc<dyn NoteRepository>,
    user_id: Option<String>,
}

impl NoteSource {
    pub fn new(repo: Arc<dyn NoteRepository>, user_id: Option<String>) -> Self {
        Self { repo, user_id }
    }
}

#[async_trait]
impl RecordSource<Note> for NoteSource {
    async fn fetch_all(&self) -> CatalogApiResult<Vec<Note>> {
        self.repo.list(self.user_id.as_deref()).await
    }
}

pub struct PyqSource {
    repo: Arc<dyn PyqRepository>,
}

impl PyqSource {
    pub fn new(repo: Arc<dyn PyqRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RecordSource<Pyq> for PyqSource {
    async fn fetch_all(&self) -> CatalogApiResult<Vec<Pyq>> {
        self.repo.list().await
    }
}

pub struct QuestionBankSource {
    repo: Arc<dyn QuestionBankRepository>,
}

impl QuestionBankSource {
    pub fn new(repo: Arc<dyn QuestionBankRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RecordSource<QuestionBank> for QuestionBankSource {
    async fn fetch_all(&self) -> CatalogApiResult<Vec<QuestionBank>> {
        self.repo.list().await
    }
}

/// The configured user's purchases, flattened into listing rows.
///
/// Purchases whose note no longer exists are dropped with a warning.
pub struct PurchasedNoteSource {
    repo: Arc<dyn PurchaseRepository>,
    user_id: Option<String>,
}

impl PurchasedNoteSource {
    pub fn new(repo: Arc<dyn PurchaseRepository>, user_id: Option<String>) -> Self {
        Self { repo, user_id }
    }
}

#[async_trait]
impl RecordSource<PurchasedNote> for PurchasedNoteSource {
    async fn fetch_all(&self) -> CatalogApiResult<Vec<PurchasedNote>> {
        let user_id = self.user_id.as_deref().ok_or_else(|| {
            CatalogApiError::InvalidRequest(
                "Purchases require CATALOG_USER_ID to be configured".to_string(),
            )
        })?;

        let purchases = self.repo.list_with_notes(user_id).await?;
        Ok(purchases
            .into_iter()
            .filter_map(|purchase| {
                let purchase_id = purchase.id.clone();
                let row = PurchasedNote::from_purchase(purchase);
                if row.is_none() {
                    tracing::warn!(purchase_id = %purchase_id, "Purchase has no note attached");
                }
                row
            })
            .collect())
    }
}
