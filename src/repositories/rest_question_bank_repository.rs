use crate::client::AsyncCatalogClient;
use crate::error::CatalogApiResult;
use crate::models::QuestionBank;
use crate::repositories::traits::QuestionBankRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Question bank repository backed by the catalog REST API.
pub struct RestQuestionBankRepository {
    client: Arc<dyn AsyncCatalogClient>,
}

impl RestQuestionBankRepository {
    pub fn new(client: Arc<dyn AsyncCatalogClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuestionBankRepository for RestQuestionBankRepository {
    async fn list(&self) -> CatalogApiResult<Vec<QuestionBank>> {
        self.client.get_question_banks().await
    }
}
