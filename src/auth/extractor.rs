use crate::api::ErrorResponse;
use crate::models::Author;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

/// Extractor that provides the caller's identity on mutating routes.
///
/// Authentication itself happens upstream; the auth layer forwards the
/// verified identity in `X-User-Id` and `X-User-Name`. Requests that reach a
/// protected handler without both headers are rejected here.
///
/// ```ignore
/// async fn my_handler(AuthUser(author): AuthUser) -> impl IntoResponse {
///     // author.id / author.username identify the caller
/// }
/// ```
pub struct AuthUser(pub Author);

pub enum AuthError {
    MissingIdentity,
    InvalidUserId,
    InvalidUsername,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingIdentity => (StatusCode::UNAUTHORIZED, "Missing identity headers"),
            AuthError::InvalidUserId => (StatusCode::UNAUTHORIZED, "Invalid X-User-Id header"),
            AuthError::InvalidUsername => (StatusCode::UNAUTHORIZED, "Invalid X-User-Name header"),
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get("x-user-id")
            .ok_or(AuthError::MissingIdentity)?
            .to_str()
            .map_err(|_| AuthError::InvalidUserId)?
            .parse::<Uuid>()
            .map_err(|_| AuthError::InvalidUserId)?;

        let username = parts
            .headers
            .get("x-user-name")
            .ok_or(AuthError::MissingIdentity)?
            .to_str()
            .map_err(|_| AuthError::InvalidUsername)?
            .to_string();

        if username.is_empty() {
            return Err(AuthError::InvalidUsername);
        }

        Ok(AuthUser(Author { id, username }))
    }
}
