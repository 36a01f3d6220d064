use super::CallCounts;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use study_catalog_mcp::error::{CatalogApiError, CatalogApiResult};
use study_catalog_mcp::models::{Purchase, Pyq, QuestionBank, UserInfo};
use study_catalog_mcp::repositories::{
    PurchaseRepository, PyqRepository, QuestionBankRepository, UserInfoRepository,
};

/// Mock PYQ repository for testing.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockPyqRepository {
    pyqs: Arc<Mutex<Vec<Pyq>>>,
    calls: CallCounts,
}

#[allow(dead_code)]
impl MockPyqRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pyq(&self, pyq: Pyq) {
        self.pyqs.lock().unwrap().push(pyq);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        self.calls.get(method)
    }
}

#[async_trait]
impl PyqRepository for MockPyqRepository {
    async fn list(&self) -> CatalogApiResult<Vec<Pyq>> {
        self.calls.track("list");
        Ok(self.pyqs.lock().unwrap().clone())
    }
}

/// Mock question bank repository for testing.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockQuestionBankRepository {
    banks: Arc<Mutex<Vec<QuestionBank>>>,
    calls: CallCounts,
}

#[allow(dead_code)]
impl MockQuestionBankRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bank(&self, bank: QuestionBank) {
        self.banks.lock().unwrap().push(bank);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        self.calls.get(method)
    }
}

#[async_trait]
impl QuestionBankRepository for MockQuestionBankRepository {
    async fn list(&self) -> CatalogApiResult<Vec<QuestionBank>> {
        self.calls.track("list");
        Ok(self.banks.lock().unwrap().clone())
    }
}

/// Mock purchase repository for testing. Purchases are kept per user.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockPurchaseRepository {
    purchases: Arc<Mutex<Vec<Purchase>>>,
    calls: CallCounts,
}

#[allow(dead_code)]
impl MockPurchaseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_purchase(&self, purchase: Purchase) {
        self.purchases.lock().unwrap().push(purchase);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        self.calls.get(method)
    }
}

#[async_trait]
impl PurchaseRepository for MockPurchaseRepository {
    async fn list_with_notes(&self, user_id: &str) -> CatalogApiResult<Vec<Purchase>> {
        self.calls.track("list_with_notes");
        let purchases = self.purchases.lock().unwrap();
        Ok(purchases
            .iter()
            .filter(|purchase| purchase.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// Mock user profile repository for testing.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockUserInfoRepository {
    users: Arc<Mutex<Vec<UserInfo>>>,
    calls: CallCounts,
}

#[allow(dead_code)]
impl MockUserInfoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: UserInfo) {
        self.users.lock().unwrap().push(user);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        self.calls.get(method)
    }
}

#[async_trait]
impl UserInfoRepository for MockUserInfoRepository {
    async fn get(&self, user_id: &str) -> CatalogApiResult<UserInfo> {
        self.calls.track("get");
        let users = self.users.lock().unwrap();
        users
            .iter()
            .find(|user| user.id == user_id)
            .cloned()
            .ok_or_else(|| CatalogApiError::NotFound(format!("user {}", user_id)))
    }
}
