//! MongoDB implementation of NoteRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::NoteResult;
use crate::models::Note;
use crate::repository::NoteRepository;

pub struct MongoNoteRepository {
    collection: Collection<Note>,
}

impl MongoNoteRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection::<Note>("notes"),
        }
    }

    /// Non-unique index on `user` backing [`NoteRepository::find_by_user`]
    #[instrument(skip(self))]
    pub async fn create_indexes(&self) -> NoteResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "user": 1 })
            .options(IndexOptions::builder().name("user_idx".to_string()).build())
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Note indexes ensured");
        Ok(())
    }

    /// Insert a note; the user directory never writes notes, this seeds tests.
    pub async fn insert(&self, note: &Note) -> NoteResult<()> {
        self.collection.insert_one(note).await?;
        Ok(())
    }
}

#[async_trait]
impl NoteRepository for MongoNoteRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: ObjectId) -> NoteResult<Option<Note>> {
        let note = self.collection.find_one(doc! { "user": user_id }).await?;
        Ok(note)
    }
}
