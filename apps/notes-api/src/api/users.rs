//! Users API wiring over the MongoDB repositories

use axum::Router;
use domain_notes::MongoNoteRepository;
use domain_users::{MongoUserRepository, UserService, handlers};
use mongodb::Database;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    handlers::router(service(state))
}

fn service(state: &AppState) -> UserService<MongoUserRepository, MongoNoteRepository> {
    let users = MongoUserRepository::new(state.db.clone());
    let notes = MongoNoteRepository::new(state.db.clone());

    UserService::new(users, notes).with_hasher(state.config.hasher.clone())
}

/// Ensure the `users.username` unique index and the `notes.user` index
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoUserRepository::new(db.clone())
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;

    MongoNoteRepository::new(db.clone())
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create note indexes: {}", e))?;

    Ok(())
}
