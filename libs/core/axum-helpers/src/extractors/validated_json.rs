//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Deserializes the body, then runs the `validator` rules. Both failure modes
/// reject with [`AppError`], so malformed JSON, wrong field types and failed
/// rules all render the standard 400 error envelope. A request without a
/// JSON body is treated like one with every field missing.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct DeleteUser {
///     #[validate(length(min = 1))]
///     id: String,
/// }
///
/// async fn delete_user(ValidatedJson(body): ValidatedJson<DeleteUser>) -> String {
///     body.id
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
