use sqlx::PgPool;
use tracing::{debug, info, instrument};
use unidocs_core::AppError;
use unidocs_models::{
    ids::UserId,
    users::{UpdateProfileDto, UserProfile},
};

const SELECT_PROFILE: &str = "SELECT id, username, email, name, first_name, sexe, age, telephone, address,
            account_type, created_at, updated_at
     FROM users";

pub struct UserService;

impl UserService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_users(db: &PgPool) -> Result<Vec<UserProfile>, AppError> {
        let users = sqlx::query_as::<_, UserProfile>(&format!(
            "{} ORDER BY created_at DESC",
            SELECT_PROFILE
        ))
        .fetch_all(db)
        .await?;

        debug!(count = users.len(), "Users fetched");
        Ok(users)
    }

    #[instrument(skip(db), fields(user.id = %id, db.operation = "SELECT", db.table = "users"))]
    pub async fn get_user(db: &PgPool, id: UserId) -> Result<UserProfile, AppError> {
        sqlx::query_as::<_, UserProfile>(&format!("{} WHERE id = $1", SELECT_PROFILE))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found.")))
    }

    #[instrument(skip(db, dto), fields(user.id = %id, db.operation = "UPDATE", db.table = "users"))]
    pub async fn update_profile(
        db: &PgPool,
        id: UserId,
        dto: UpdateProfileDto,
    ) -> Result<UserProfile, AppError> {
        let user = sqlx::query_as::<_, UserProfile>(
            "UPDATE users
             SET name = $1, first_name = $2, sexe = $3, age = $4, telephone = $5, address = $6,
                 updated_at = NOW()
             WHERE id = $7
             RETURNING id, username, email, name, first_name, sexe, age, telephone, address,
                       account_type, created_at, updated_at",
        )
        .bind(&dto.name)
        .bind(&dto.first_name)
        .bind(&dto.sexe)
        .bind(dto.age)
        .bind(&dto.telephone)
        .bind(&dto.address)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found.")))?;

        info!(user.id = %id, "Profile updated");
        Ok(user)
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;
    use crate::modules::auth::service::AuthService;
    use axum::http::StatusCode;
    use unidocs_models::{AccountType, users::SignupDto};

    async fn signup(pool: &PgPool) -> UserId {
        AuthService::signup(
            pool,
            SignupDto {
                username: "jane".to_string(),
                account_type: AccountType::Student,
                email: "jane@example.com".to_string(),
                password: "password123".to_string(),
            },
        )
        .await
        .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_profile(pool: PgPool) {
        let id = signup(&pool).await;

        let user = UserService::update_profile(
            &pool,
            id,
            UpdateProfileDto {
                name: "Doe".to_string(),
                first_name: "Jane".to_string(),
                sexe: "female".to_string(),
                age: 20,
                telephone: "0812345678".to_string(),
                address: "Kinshasa".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(user.first_name.as_deref(), Some("Jane"));
        assert_eq!(user.age, Some(20));

        let all = UserService::get_users(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_get_unknown_user(pool: PgPool) {
        let err = UserService::get_user(&pool, UserId::new()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
