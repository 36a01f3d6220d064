//! Async wrapper around the synchronous CatalogClient.
//!
//! Each call runs on tokio's blocking thread pool so HTTP I/O never stalls
//! the async runtime.

use crate::client::CatalogClient;
use crate::error::{CatalogApiError, CatalogApiResult};
use crate::models::{Note, Purchase, Pyq, QuestionBank, UserInfo};
use async_trait::async_trait;
use std::sync::Arc;

/// Async catalog client operations.
#[async_trait]
pub trait AsyncCatalogClient: Send + Sync {
    async fn get_notes(&self, user_id: Option<&str>) -> CatalogApiResult<Vec<Note>>;
    async fn get_note(&self, id: &str) -> CatalogApiResult<Note>;
    async fn get_pyqs(&self) -> CatalogApiResult<Vec<Pyq>>;
    async fn get_question_banks(&self) -> CatalogApiResult<Vec<QuestionBank>>;
    async fn get_purchases_with_notes(&self, user_id: &str) -> CatalogApiResult<Vec<Purchase>>;
    async fn get_user_info(&self, user_id: &str) -> CatalogApiResult<UserInfo>;
}

/// Async wrapper around synchronous CatalogClient.
#[derive(Clone)]
pub struct AsyncCatalogClientImpl {
    client: Arc<CatalogClient>,
}

impl AsyncCatalogClientImpl {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

/// Run a blocking client call off the async runtime.
async fn run_blocking<T, F>(f: F) -> CatalogApiResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> CatalogApiResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| CatalogApiError::HttpError(format!("Task join error: {}", e)))?
}

#[async_trait]
impl AsyncCatalogClient for AsyncCatalogClientImpl {
    async fn get_notes(&self, user_id: Option<&str>) -> CatalogApiResult<Vec<Note>> {
        let client = self.client.clone();
        let user_id = user_id.map(str::to_string);

        run_blocking(move || client.get_notes(user_id.as_deref())).await
    }

    async fn get_note(&self, id: &str) -> CatalogApiResult<Note> {
        let client = self.client.clone();
        let id = id.to_string();

        run_blocking(move || client.get_note(&id)).await
    }

    async fn get_pyqs(&self) -> CatalogApiResult<Vec<Pyq>> {
        let client = self.client.clone();
        run_blocking(move || client.get_pyqs()).await
    }

    async fn get_question_banks(&self) -> CatalogApiResult<Vec<QuestionBank>> {
        let client = self.client.clone();
        run_blocking(move || client.get_question_banks()).await
    }

    async fn get_purchases_with_notes(&self, user_id: &str) -> CatalogApiResult<Vec<Purchase>> {
        let client = self.client.clone();
        let user_id = user_id.to_string();

        run_blocking(move || client.get_purchases_with_notes(&user_id)).await
    }

    async fn get_user_info(&self, user_id: &str) -> CatalogApiResult<UserInfo> {
        let client = self.client.clone();
        let user_id = user_id.to_string();

        run_blocking(move || client.get_user_info(&user_id)).await
    }
}
