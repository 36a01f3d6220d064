//! Per-entity fetch seams over the catalog backend.

mod rest_note_repository;
mod rest_purchase_repository;
mod rest_pyq_repository;
mod rest_question_bank_repository;
mod traits;

pub use rest_note_repository::RestNoteRepository;
pub use rest_purchase_repository::{RestPurchaseRepository, RestUserInfoRepository};
pub use rest_pyq_repository::RestPyqRepository;
pub use rest_question_bank_repository::RestQuestionBankRepository;
pub use traits::{
    NoteRepository, PurchaseRepository, PyqRepository, QuestionBankRepository,
    UserInfoRepository,
};

use crate::client::AsyncCatalogClient;
use std::sync::Arc;

/// Every repository the catalog service needs.
#[derive(Clone)]
pub struct Repositories {
    pub notes: Arc<dyn NoteRepository>,
    pub pyqs: Arc<dyn PyqRepository>,
    pub question_banks: Arc<dyn QuestionBankRepository>,
    pub purchases: Arc<dyn PurchaseRepository>,
    pub user_info: Arc<dyn UserInfoRepository>,
}

impl Repositories {
    /// Wire REST-backed repositories over one shared client.
    pub fn rest(client: Arc<dyn AsyncCatalogClient>) -> Self {
        Self {
            notes: Arc::new(RestNoteRepository::new(client.clone())),
            pyqs: Arc::new(RestPyqRepository::new(client.clone())),
            question_banks: Arc::new(RestQuestionBankRepository::new(client.clone())),
            purchases: Arc::new(RestPurchaseRepository::new(client.clone())),
            user_info: Arc::new(RestUserInfoRepository::new(client)),
        }
    }
}
