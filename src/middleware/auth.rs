use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use serde::Serialize;
use sqlx::FromRow;
use unidocs_auth::{Claims, verify_token};
use unidocs_core::AppError;
use unidocs_models::{AccountType, ids::UserId};

use crate::state::AppState;

pub const MISSING_TOKEN_MESSAGE: &str = "Please provide an API key to use this endpoint.";

/// Verified token claims of the caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0.user_id().map(UserId::from)
    }
}

/// Reads the bearer token out of an `Authorization` header value.
pub fn bearer_token(header_value: Option<&str>) -> Result<&str, AppError> {
    header_value
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized(MISSING_TOKEN_MESSAGE))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let token = bearer_token(header_value)?;
        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// The user a guard let through, stored in the request extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    pub account_type: AccountType,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(MISSING_TOKEN_MESSAGE))
    }
}
