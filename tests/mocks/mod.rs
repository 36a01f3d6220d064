//! In-memory repositories for integration tests.

mod mock_catalog_repositories;
mod mock_note_repository;

#[allow(unused_imports)]
pub use mock_catalog_repositories::{
    MockPurchaseRepository, MockPyqRepository, MockQuestionBankRepository, MockUserInfoRepository,
};
#[allow(unused_imports)]
pub use mock_note_repository::MockNoteRepository;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Shared per-method call counter.
#[derive(Clone, Default)]
pub struct CallCounts(Arc<Mutex<HashMap<String, usize>>>);

#[allow(dead_code)]
impl CallCounts {
    pub fn track(&self, method: &str) {
        let mut counts = self.0.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, method: &str) -> usize {
        let counts = self.0.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn reset(&self) {
        self.0.lock().unwrap().clear();
    }
}
