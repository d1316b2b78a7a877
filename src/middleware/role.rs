//! Account type guards.
//!
//! Every guard authenticates the caller, loads the user behind the token and
//! compares its account type with the allowed set. An empty set lets any
//! account through.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sqlx::PgPool;
use tracing::{debug, warn};
use unidocs_core::AppError;
use unidocs_models::{AccountType, ids::UserId};

use crate::middleware::auth::{AuthUser, CurrentUser};
use crate::state::AppState;

pub const FORBIDDEN_ROLE_MESSAGE: &str = "You do not have the required role to perform this action.";

pub fn is_allowed(account_type: AccountType, allowed: &[AccountType]) -> bool {
    allowed.is_empty() || allowed.contains(&account_type)
}

pub fn check_role(user: &CurrentUser, allowed: &[AccountType]) -> Result<(), AppError> {
    if is_allowed(user.account_type, allowed) {
        Ok(())
    } else {
        warn!(
            user.id = %user.id,
            account_type = %user.account_type,
            "Account type not allowed on this route"
        );
        Err(AppError::forbidden(FORBIDDEN_ROLE_MESSAGE))
    }
}

async fn load_user(db: &PgPool, id: UserId) -> Result<CurrentUser, AppError> {
    sqlx::query_as::<_, CurrentUser>("SELECT id, username, account_type FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found.")))
}

pub async fn require_roles(
    state: AppState,
    req: Request,
    next: Next,
    allowed: &[AccountType],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    let user = load_user(&state.db, auth_user.user_id()?).await?;
    check_role(&user, allowed)?;

    debug!(user.id = %user.id, account_type = %user.account_type, "Caller authorized");
    parts.extensions.insert(user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

async fn guard(state: AppState, req: Request, next: Next, allowed: &[AccountType]) -> Response {
    match require_roles(state, req, next, allowed).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_owner(State(state): State<AppState>, req: Request, next: Next) -> Response {
    guard(state, req, next, &[AccountType::Owner]).await
}

pub async fn require_professor(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    guard(state, req, next, &[AccountType::Professor]).await
}

pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    guard(state, req, next, &[AccountType::Student]).await
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    guard(state, req, next, &[AccountType::Admin]).await
}

/// Any authenticated account.
pub async fn require_auth(State(state): State<AppState>, req: Request, next: Next) -> Response {
    guard(state, req, next, &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn user(account_type: AccountType) -> CurrentUser {
        CurrentUser {
            id: UserId::new(),
            username: "someone".to_string(),
            account_type,
        }
    }

    #[test]
    fn test_exact_account_type_match() {
        assert!(is_allowed(AccountType::Owner, &[AccountType::Owner]));
        assert!(!is_allowed(AccountType::Admin, &[AccountType::Owner]));
        assert!(!is_allowed(AccountType::Student, &[AccountType::Professor]));
    }

    #[test]
    fn test_empty_set_allows_everyone() {
        for account_type in AccountType::ALL {
            assert!(is_allowed(account_type, &[]));
        }
    }

    #[test]
    fn test_check_role_forbidden_message() {
        assert!(check_role(&user(AccountType::Professor), &[AccountType::Professor]).is_ok());

        let err = check_role(&user(AccountType::Student), &[AccountType::Owner]).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.error.to_string(), FORBIDDEN_ROLE_MESSAGE);
    }
}
