//! Users Domain
//!
//! The user directory: list, create, update and delete users stored in
//! MongoDB, with unique usernames, argon2 password hashes and a guard that
//! refuses to delete users still referenced by notes.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (GET/POST/PATCH/DELETE /users)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, uniqueness, note guard, hashing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← UserRepository (MongoDB, in-memory) + NoteRepository
//! └─────────────┘
//! ```
//!
//! ```rust,no_run
//! use domain_notes::MongoNoteRepository;
//! use domain_users::{MongoUserRepository, UserService, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("notes");
//!
//! let users = MongoUserRepository::new(db.clone());
//! users.create_indexes().await?;
//!
//! let service = UserService::new(users, MongoNoteRepository::new(db));
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod password;
pub mod repository;
pub mod service;

pub use error::{UserError, UserErrorKind, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateUser, DeleteUser, DeletedUserResponse, MessageResponse, NewUser, Role, UpdateUser, User,
    UserResponse,
};
pub use crate::mongodb::MongoUserRepository;
pub use password::{PasswordConfig, PasswordHasher};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
