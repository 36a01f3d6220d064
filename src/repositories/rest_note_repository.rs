use crate::client::AsyncCatalogClient;
use crate::error::CatalogApiResult;
use crate::models::Note;
use crate::repositories::traits::NoteRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Note repository backed by the catalog REST API.
///
/// Delegates every operation to the AsyncCatalogClient.
pub struct RestNoteRepository {
    client: Arc<dyn AsyncCatalogClient>,
}

impl RestNoteRepository {
    /// Create a new RestNoteRepository with the given client.
    pub fn new(client: Arc<dyn AsyncCatalogClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NoteRepository for RestNoteRepository {
    async fn list(&self, user_id: Option<&str>) -> CatalogApiResult<Vec<Note>> {
        self.client.get_notes(user_id).await
    }

    async fn get(&self, id: &str) -> CatalogApiResult<Note> {
        self.client.get_note(id).await
    }
}
