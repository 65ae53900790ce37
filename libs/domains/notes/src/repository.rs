use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::NoteResult;
use crate::models::Note;

/// Read-side access to notes, keyed by their owning user
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Any one note owned by `user_id`, if the user has notes
    async fn find_by_user(&self, user_id: ObjectId) -> NoteResult<Option<Note>>;
}

/// In-memory note store for tests and local development
#[derive(Clone, Default)]
pub struct InMemoryNoteRepository {
    notes: Arc<RwLock<HashMap<ObjectId, Note>>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, note: Note) {
        self.notes.write().await.insert(note.id, note);
    }

    pub async fn remove(&self, id: ObjectId) -> Option<Note> {
        self.notes.write().await.remove(&id)
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: ObjectId) -> NoteResult<Option<Note>> {
        let notes = self.notes.read().await;
        Ok(notes.values().find(|n| n.user == user_id).cloned())
    }
}
