//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc, oid::ObjectId},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};
use crate::repository::UserRepository;

/// Server error code for a unique index violation
const DUPLICATE_KEY: i32 = 11000;

/// MongoDB implementation of the UserRepository
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection::<User>("users"),
        }
    }

    /// Unique index on `username`.
    ///
    /// With the index in place concurrent creates or renames to the same
    /// username cannot both succeed; the loser gets a duplicate-key error.
    #[instrument(skip(self))]
    pub async fn create_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .name("username_unique".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("User indexes ensured");
        Ok(())
    }
}

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

/// Insert failures: duplicates are conflicts, other write errors are a
/// rejected document, anything else is a database failure.
fn map_insert_error(err: MongoError, username: &str) -> UserError {
    if is_duplicate_key(&err) {
        return UserError::DuplicateUsername(username.to_string());
    }
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => UserError::Rejected(e.message.clone()),
        _ => err.into(),
    }
}

/// Documents another writer left in a shape this service cannot read (for
/// example a role it does not know) are logged and left out of listings.
fn decode_users(docs: Vec<Document>) -> Vec<User> {
    docs.into_iter()
        .filter_map(|doc| {
            let id = doc.get_object_id("_id").ok();
            bson::from_document::<User>(doc)
                .map_err(|e| {
                    tracing::warn!(user_id = ?id, error = %e, "Skipping unreadable user document")
                })
                .ok()
        })
        .collect()
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> UserResult<Vec<User>> {
        let cursor = self
            .collection
            .clone_with_type::<Document>()
            .find(doc! {})
            .await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(decode_users(docs))
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> UserResult<Option<User>> {
        let user = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "username": username })
            .await?;
        Ok(user)
    }

    #[instrument(skip(self, input), fields(username = %input.username))]
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let user = User::new(input);

        self.collection
            .insert_one(&user)
            .await
            .map_err(|e| map_insert_error(e, &user.username))?;

        tracing::info!(user_id = %user.id, "User created successfully");
        Ok(user)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: User) -> UserResult<User> {
        let result = self
            .collection
            .replace_one(doc! { "_id": user.id }, &user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    UserError::DuplicateUsername(user.username.clone())
                } else {
                    e.into()
                }
            })?;

        if result.matched_count == 0 {
            return Err(UserError::NotFound);
        }

        tracing::info!("User updated successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> UserResult<Option<User>> {
        let removed = self
            .collection
            .find_one_and_delete(doc! { "_id": id })
            .await?;

        if removed.is_some() {
            tracing::info!("User deleted successfully");
        }
        Ok(removed)
    }
}
