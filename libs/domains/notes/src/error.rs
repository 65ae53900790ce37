use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("Database error: {0}")]
    Database(String),
}

pub type NoteResult<T> = Result<T, NoteError>;

impl From<mongodb::error::Error> for NoteError {
    fn from(err: mongodb::error::Error) -> Self {
        NoteError::Database(err.to_string())
    }
}
