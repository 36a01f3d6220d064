use super::CallCounts;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use study_catalog_mcp::error::{CatalogApiError, CatalogApiResult};
use study_catalog_mcp::models::Note;
use study_catalog_mcp::repositories::NoteRepository;

/// Mock note repository for testing.
///
/// Notes are listed in insertion order, like the backend's `createdAt.desc`
/// ordering. Notes whose id is in `purchased` come back with
/// `is_purchased` set when a user id is passed.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockNoteRepository {
    notes: Arc<Mutex<Vec<Note>>>,
    purchased: Arc<Mutex<Vec<String>>>,
    fail: Arc<AtomicBool>,
    calls: CallCounts,
}

#[allow(dead_code)]
impl MockNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_note(&self, note: Note) {
        self.notes.lock().unwrap().push(note);
    }

    pub fn add_notes(&self, notes: Vec<Note>) {
        self.notes.lock().unwrap().extend(notes);
    }

    pub fn mark_purchased(&self, note_id: &str) {
        self.purchased.lock().unwrap().push(note_id.to_string());
    }

    /// Make every following call fail with a server error.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        self.calls.get(method)
    }

    pub fn reset_call_counts(&self) {
        self.calls.reset();
    }

    pub fn clear(&self) {
        self.notes.lock().unwrap().clear();
    }

    fn check_failure(&self) -> CatalogApiResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CatalogApiError::ApiError {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl NoteRepository for MockNoteRepository {
    async fn list(&self, user_id: Option<&str>) -> CatalogApiResult<Vec<Note>> {
        self.calls.track("list");
        self.check_failure()?;

        let purchased = self.purchased.lock().unwrap();
        let notes = self.notes.lock().unwrap();
        Ok(notes
            .iter()
            .cloned()
            .map(|mut note| {
                note.is_purchased = user_id.is_some() && purchased.contains(&note.id);
                note
            })
            .collect())
    }

    async fn get(&self, id: &str) -> CatalogApiResult<Note> {
        self.calls.track("get");
        self.check_failure()?;

        let notes = self.notes.lock().unwrap();
        notes
            .iter()
            .find(|note| note.id == id)
            .cloned()
            .ok_or_else(|| CatalogApiError::NotFound(format!("note {}", id)))
    }
}
