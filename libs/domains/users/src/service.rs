use chrono::Utc;
use domain_notes::NoteRepository;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ALL_FIELDS_REQUIRED, USER_ID_REQUIRED, UserError, UserResult};
use crate::models::{CreateUser, DeleteUser, NewUser, UpdateUser, UserResponse};
use crate::password::PasswordHasher;
use crate::repository::UserRepository;

/// User directory: list, create, update and delete users.
///
/// Holds no state between calls; every operation re-reads the stores.
pub struct UserService<R: UserRepository, N: NoteRepository> {
    users: Arc<R>,
    notes: Arc<N>,
    hasher: PasswordHasher,
}

impl<R: UserRepository, N: NoteRepository> UserService<R, N> {
    pub fn new(users: R, notes: N) -> Self {
        Self {
            users: Arc::new(users),
            notes: Arc::new(notes),
            hasher: PasswordHasher::default(),
        }
    }

    pub fn with_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// All users without passwords. An empty directory is an error.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.users.list().await?;
        if users.is_empty() {
            return Err(UserError::NoUsers);
        }
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|_| UserError::Validation(ALL_FIELDS_REQUIRED.to_string()))?;

        if self.users.get_by_username(&input.username).await?.is_some() {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let password_hash = self.hasher.hash(&input.password)?;

        let user = self
            .users
            .create(NewUser {
                username: input.username,
                password_hash,
                roles: input.roles,
            })
            .await?;

        tracing::info!(
            user_id = %user.id,
            roles = %user.roles.iter().map(ToString::to_string).collect::<Vec<_>>().join(","),
            "User created"
        );
        Ok(user.into())
    }

    /// Username, roles and active are always applied; the password only
    /// when a non-empty one is supplied.
    #[instrument(skip(self, input), fields(user_id = %input.id))]
    pub async fn update_user(&self, input: UpdateUser) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|_| UserError::Validation(ALL_FIELDS_REQUIRED.to_string()))?;

        let id = parse_id(&input.id)?;
        let mut user = self
            .users
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound)?;

        if let Some(existing) = self.users.get_by_username(&input.username).await? {
            if existing.id != id {
                return Err(UserError::DuplicateUsername(input.username));
            }
        }

        user.username = input.username;
        user.roles = input.roles;
        user.active = input.active;
        if let Some(password) = input.password.as_deref().filter(|p| !p.is_empty()) {
            user.password = self.hasher.hash(password)?;
        }
        user.updated_at = Utc::now();

        let updated = self.users.update(user).await?;
        Ok(updated.into())
    }

    /// Refused while any note still references the user.
    #[instrument(skip(self, input), fields(user_id = %input.id))]
    pub async fn delete_user(&self, input: DeleteUser) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|_| UserError::Validation(USER_ID_REQUIRED.to_string()))?;

        let id = parse_id(&input.id)?;

        if self.notes.find_by_user(id).await?.is_some() {
            return Err(UserError::HasAssignedNotes);
        }

        let removed = self.users.delete(id).await?.ok_or(UserError::NotFound)?;
        Ok(removed.into())
    }
}

fn parse_id(id: &str) -> UserResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| UserError::InvalidId(id.to_string()))
}
