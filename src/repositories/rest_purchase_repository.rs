use crate::client::AsyncCatalogClient;
use crate::error::CatalogApiResult;
use crate::models::{Purchase, UserInfo};
use crate::repositories::traits::{PurchaseRepository, UserInfoRepository};
use async_trait::async_trait;
use std::sync::Arc;

/// Purchase repository backed by the catalog REST API.
pub struct RestPurchaseRepository {
    client: Arc<dyn AsyncCatalogClient>,
}

impl RestPurchaseRepository {
    pub fn new(client: Arc<dyn AsyncCatalogClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PurchaseRepository for RestPurchaseRepository {
    async fn list_with_notes(&self, user_id: &str) -> CatalogApiResult<Vec<Purchase>> {
        self.client.get_purchases_with_notes(user_id).await
    }
}

/// Profile repository backed by the catalog REST API.
pub struct RestUserInfoRepository {
    client: Arc<dyn AsyncCatalogClient>,
}

impl RestUserInfoRepository {
    pub fn new(client: Arc<dyn AsyncCatalogClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserInfoRepository for RestUserInfoRepository {
    async fn get(&self, user_id: &str) -> CatalogApiResult<UserInfo> {
        self.client.get_user_info(user_id).await
    }
}
