use sqlx::PgPool;
use tracing::{info, instrument};
use unidocs_core::{AppError, hash_password};
use unidocs_models::{ids::UserId, users::SignupDto};
use unidocs_observability::track_user_signed_up;

use crate::utils::sql::map_write_error;

pub struct AuthService;

impl AuthService {
    /// Creates the account behind an identity-provider user.
    #[instrument(skip(db, dto), fields(user.email = %dto.email, db.operation = "INSERT", db.table = "users"))]
    pub async fn signup(db: &PgPool, dto: SignupDto) -> Result<UserId, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let id = sqlx::query_scalar::<_, UserId>(
            "INSERT INTO users (email, password_hash, username, account_type)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(dto.email.trim().to_lowercase())
        .bind(&password_hash)
        .bind(&dto.username)
        .bind(dto.account_type)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, "Email already in use"))?;

        track_user_signed_up(dto.account_type.as_str());
        info!(user.id = %id, account_type = %dto.account_type, "User signed up");

        Ok(id)
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use unidocs_models::AccountType;

    fn dto(email: &str) -> SignupDto {
        SignupDto {
            username: "jdoe".to_string(),
            account_type: AccountType::Student,
            email: email.to_string(),
            password: "password123".to_string(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_signup_hashes_password(pool: PgPool) {
        let id = AuthService::signup(&pool, dto("JDoe@Example.com")).await.unwrap();

        let (email, hash): (String, String) =
            sqlx::query_as("SELECT email, password_hash FROM users WHERE id = $1")
                .bind(id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(email, "jdoe@example.com");
        assert_ne!(hash, "password123");
        assert!(unidocs_core::verify_password("password123", &hash).unwrap());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_signup_duplicate_email(pool: PgPool) {
        AuthService::signup(&pool, dto("dup@example.com")).await.unwrap();
        let err = AuthService::signup(&pool, dto("dup@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "Email already in use");
    }
}
