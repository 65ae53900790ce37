//! Notes Domain
//!
//! Read access to the `notes` collection. Users cannot be deleted while a
//! note references them, so the user directory looks notes up by owner
//! through [`NoteRepository`].
//!
//! ```rust,no_run
//! use domain_notes::{MongoNoteRepository, NoteRepository};
//! use mongodb::{Client, bson::oid::ObjectId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let notes = MongoNoteRepository::new(client.database("notes"));
//! notes.create_indexes().await?;
//!
//! let owned = notes.find_by_user(ObjectId::new()).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod mongodb;
pub mod repository;

pub use error::{NoteError, NoteResult};
pub use models::Note;
pub use crate::mongodb::MongoNoteRepository;
pub use repository::{InMemoryNoteRepository, NoteRepository};
