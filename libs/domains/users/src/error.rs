use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_notes::NoteError;
use thiserror::Error;

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const USER_ID_REQUIRED: &str = "User ID required";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("No users found")]
    NoUsers,

    #[error("User not found")]
    NotFound,

    #[error("user already exists: {0}")]
    DuplicateUsername(String),

    #[error("User has assigned note")]
    HasAssignedNotes,

    #[error("Invalid user id: {0}")]
    InvalidId(String),

    #[error("{0}")]
    Validation(String),

    /// The store refused the document for a reason other than uniqueness
    #[error("invalid user data: {0}")]
    Rejected(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Coarse classification of [`UserError`] for callers that do not speak HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserErrorKind {
    InvalidInput,
    Conflict,
    NotFound,
    Internal,
}

impl UserError {
    pub fn kind(&self) -> UserErrorKind {
        match self {
            UserError::NoUsers | UserError::NotFound => UserErrorKind::NotFound,
            UserError::DuplicateUsername(_) => UserErrorKind::Conflict,
            UserError::HasAssignedNotes
            | UserError::InvalidId(_)
            | UserError::Validation(_)
            | UserError::Rejected(_) => UserErrorKind::InvalidInput,
            UserError::PasswordHash(_) | UserError::Database(_) => UserErrorKind::Internal,
        }
    }
}

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            // An empty directory answers 400, not 404
            UserError::NoUsers => AppError::BadRequest("No users found".to_string()),
            UserError::NotFound => AppError::NotFound("User not found".to_string()),
            UserError::DuplicateUsername(_) => {
                AppError::Conflict("user already exists".to_string())
            }
            UserError::HasAssignedNotes => {
                AppError::BadRequest("User has assigned note".to_string())
            }
            UserError::InvalidId(id) => AppError::InvalidId(format!("Invalid user id: {}", id)),
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::Rejected(detail) => {
                tracing::info!(%detail, "Store rejected user document");
                AppError::BadRequest("invalid user data".to_string())
            }
            UserError::PasswordHash(msg) => {
                tracing::error!("Password hash error: {}", msg);
                AppError::InternalServerError("An internal error occurred".to_string())
            }
            UserError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}

impl From<NoteError> for UserError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::Database(msg) => UserError::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status(err: UserError) -> StatusCode {
        AppError::from(err).status()
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(UserError::NotFound.kind(), UserErrorKind::NotFound);
        assert_eq!(UserError::NoUsers.kind(), UserErrorKind::NotFound);
        assert_eq!(
            UserError::DuplicateUsername("alice".into()).kind(),
            UserErrorKind::Conflict
        );
        assert_eq!(UserError::HasAssignedNotes.kind(), UserErrorKind::InvalidInput);
        assert_eq!(
            UserError::Rejected("schema".into()).kind(),
            UserErrorKind::InvalidInput
        );
        assert_eq!(
            UserError::Database("down".into()).kind(),
            UserErrorKind::Internal
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status(UserError::NoUsers), StatusCode::BAD_REQUEST);
        assert_eq!(status(UserError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status(UserError::DuplicateUsername("alice".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(status(UserError::HasAssignedNotes), StatusCode::BAD_REQUEST);
        assert_eq!(status(UserError::InvalidId("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(UserError::PasswordHash("params".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(UserError::Database("down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_note_error_becomes_database_error() {
        let err: UserError = NoteError::Database("timeout".into()).into();
        assert!(matches!(err, UserError::Database(msg) if msg == "timeout"));
    }
}
