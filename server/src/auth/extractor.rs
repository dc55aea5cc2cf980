use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::models::User;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::db::get_user_from_token;

/// Authenticated-user extractor. Handlers that require a login take
/// `AuthUser(user)` as an argument; public handlers (recipe reads,
/// reviews listing) simply omit it, so no router-level middleware is
/// involved.
pub struct AuthUser(pub User);

pub enum AuthError {
    /// The Authorization header is absent, not valid UTF-8, or not a
    /// `Bearer` scheme. Collapsed into one variant: the client gets the
    /// same 401 either way.
    BadHeader,
    /// A well-formed token that matches no live session.
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::BadHeader => "Authentication required",
            AuthError::InvalidToken => "Invalid or expired token",
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::BadHeader)?
        .to_str()
        .map_err(|_| AuthError::BadHeader)?
        .strip_prefix("Bearer ")
        .ok_or(AuthError::BadHeader)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<DbPool>: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let pool = Arc::<DbPool>::from_ref(state);
        let user = get_user_from_token(&pool, token)
            .await
            .ok_or(AuthError::InvalidToken)?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extracted() {
        let parts = parts_with_auth(Some("Bearer abc123"));
        assert_eq!(bearer_token(&parts).ok(), Some("abc123"));
    }

    #[test]
    fn test_missing_header_rejected() {
        let parts = parts_with_auth(None);
        assert!(matches!(bearer_token(&parts), Err(AuthError::BadHeader)));
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let parts = parts_with_auth(Some("Basic dXNlcjpwdw=="));
        assert!(matches!(bearer_token(&parts), Err(AuthError::BadHeader)));
    }

    #[test]
    fn test_empty_token_is_still_a_token() {
        // "Bearer " with nothing after it parses; rejection happens at
        // session lookup, not header parsing.
        let parts = parts_with_auth(Some("Bearer "));
        assert_eq!(bearer_token(&parts).ok(), Some(""));
    }
}
