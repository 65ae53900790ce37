use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use domain_notes::NoteRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{
    CreateUser, DeleteUser, DeletedUserResponse, MessageResponse, Role, UpdateUser, UserResponse,
};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, update_user, delete_user),
    components(
        schemas(
            UserResponse,
            CreateUser,
            UpdateUser,
            DeleteUser,
            MessageResponse,
            DeletedUserResponse,
            Role
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<R, N> = State<Arc<UserService<R, N>>>;

/// Create the users router. Every operation lives on the collection path;
/// update and delete carry the id in the body.
pub fn router<R, N>(service: UserService<R, N>) -> Router
where
    R: UserRepository + 'static,
    N: NoteRepository + 'static,
{
    Router::new()
        .route(
            "/",
            get(list_users)
                .post(create_user)
                .patch(update_user)
                .delete(delete_user),
        )
        .with_state(Arc::new(service))
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "All users, without passwords", body = Vec<UserResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository, N: NoteRepository>(
    State(service): SharedService<R, N>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Create a user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository, N: NoteRepository>(
    State(service): SharedService<R, N>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("USER CREATED SUCCESSFULLY {}", user.username),
        }),
    ))
}

/// Update a user's username, roles, active flag and optionally password
#[utoipa::path(
    patch,
    path = "",
    tag = "Users",
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository, N: NoteRepository>(
    State(service): SharedService<R, N>,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<MessageResponse>> {
    let user = service.update_user(input).await?;
    Ok(Json(MessageResponse {
        message: format!("{} is now updated", user.username),
    }))
}

/// Delete a user that no note references
#[utoipa::path(
    delete,
    path = "",
    tag = "Users",
    request_body = DeleteUser,
    responses(
        (status = 200, description = "User deleted", body = DeletedUserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository, N: NoteRepository>(
    State(service): SharedService<R, N>,
    ValidatedJson(input): ValidatedJson<DeleteUser>,
) -> UserResult<Json<DeletedUserResponse>> {
    let user = service.delete_user(input).await?;
    Ok(Json(DeletedUserResponse {
        message: format!(
            "Username {} With ID {} was successfully deleted",
            user.username, user.id
        ),
        id: user.id,
        username: user.username,
    }))
}
