use crate::error::CatalogApiResult;
use crate::models::{Note, Purchase, Pyq, QuestionBank, UserInfo};
use async_trait::async_trait;

/// Repository for the notes catalog.
///
/// Abstracts over where notes come from so the listing layer can be
/// tested against in-memory data.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List every note, newest first, with purchase status for `user_id`.
    async fn list(&self, user_id: Option<&str>) -> CatalogApiResult<Vec<Note>>;

    /// Retrieve a single note by ID.
    async fn get(&self, id: &str) -> CatalogApiResult<Note>;
}

/// Repository for previous-year papers.
#[async_trait]
pub trait PyqRepository: Send + Sync {
    /// List every paper, newest first.
    async fn list(&self) -> CatalogApiResult<Vec<Pyq>>;
}

/// Repository for question banks.
#[async_trait]
pub trait QuestionBankRepository: Send + Sync {
    /// List every question bank, newest first.
    async fn list(&self) -> CatalogApiResult<Vec<QuestionBank>>;
}

/// Repository for a user's purchases.
#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    /// List a user's purchases with the notes embedded, newest first.
    async fn list_with_notes(&self, user_id: &str) -> CatalogApiResult<Vec<Purchase>>;
}

/// Repository for user profiles.
#[async_trait]
pub trait UserInfoRepository: Send + Sync {
    async fn get(&self, user_id: &str) -> CatalogApiResult<UserInfo>;
}
