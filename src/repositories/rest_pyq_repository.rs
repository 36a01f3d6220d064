use crate::client::AsyncCatalogClient;
use crate::error::CatalogApiResult;
use crate::models::Pyq;
use crate::repositories::traits::PyqRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Previous-year paper repository backed by the catalog REST API.
pub struct RestPyqRepository {
    client: Arc<dyn AsyncCatalogClient>,
}

impl RestPyqRepository {
    pub fn new(client: Arc<dyn AsyncCatalogClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PyqRepository for RestPyqRepository {
    async fn list(&self) -> CatalogApiResult<Vec<Pyq>> {
        self.client.get_pyqs().await
    }
}
