use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};
use unidocs_core::AppError;
use unidocs_models::{
    ids::{UniversityId, UserId},
    universities::{University, UniversityDetails, UniversityForm},
};
use unidocs_observability::track_record_created;

use crate::utils::sql::map_write_error;

const RETURNING: &str =
    "RETURNING id, name, description, address, logo, user_id, status, created_at, updated_at";

const SELECT_DETAILS: &str = "SELECT un.id, un.name, un.description, un.address, un.logo, un.status,
            un.created_at, un.updated_at,
            json_build_object('id', u.id, 'username', u.username, 'name', u.name,
                              'firstName', u.first_name) AS \"user\"
     FROM universities un
     JOIN users u ON u.id = un.user_id";

pub struct UniversityService;

impl UniversityService {
    #[instrument(skip(db, form), fields(university.name = %form.name, db.operation = "INSERT", db.table = "universities"))]
    pub async fn create_university(
        db: &PgPool,
        owner: UserId,
        form: UniversityForm,
        logo: Option<&str>,
    ) -> Result<University, AppError> {
        let university = sqlx::query_as::<_, University>(&format!(
            "INSERT INTO universities (name, description, address, logo, user_id)
             VALUES ($1, $2, $3, $4, $5) {}",
            RETURNING
        ))
        .bind(&form.name)
        .bind(&form.description)
        .bind(&form.address)
        .bind(logo)
        .bind(owner)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, "University already exists"))?;

        track_record_created("university");
        info!(university.id = %university.id, owner = %owner, "University created");

        Ok(university)
    }

    /// Fails with 403 unless `caller` owns the university.
    #[instrument(skip(db), fields(university.id = %id, db.operation = "SELECT", db.table = "universities"))]
    pub async fn ensure_owner(db: &PgPool, id: UniversityId, caller: UserId) -> Result<(), AppError> {
        let owner = sqlx::query_scalar::<_, UserId>("SELECT user_id FROM universities WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("University not found")))?;

        if owner != caller {
            warn!(caller = %caller, owner = %owner, "Update attempted by non-owner");
            return Err(AppError::forbidden(
                "Only the owner of this university can update it",
            ));
        }

        Ok(())
    }

    /// Replaces the text fields; the logo only changes when a new one is given.
    /// Also returns the logo URL that was replaced, if any.
    #[instrument(skip(db, form), fields(university.id = %id, db.operation = "UPDATE", db.table = "universities"))]
    pub async fn update_university(
        db: &PgPool,
        id: UniversityId,
        form: UniversityForm,
        logo: Option<&str>,
    ) -> Result<(University, Option<String>), AppError> {
        let mut tx = db.begin().await?;

        let previous_logo = sqlx::query_scalar::<_, Option<String>>(
            "SELECT logo FROM universities WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("University not found")))?;

        let university = sqlx::query_as::<_, University>(&format!(
            "UPDATE universities
             SET name = $1, description = $2, address = $3, logo = COALESCE($4, logo),
                 updated_at = NOW()
             WHERE id = $5 {}",
            RETURNING
        ))
        .bind(&form.name)
        .bind(&form.description)
        .bind(&form.address)
        .bind(logo)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "University already exists"))?;

        tx.commit().await?;

        let replaced = match (logo, previous_logo) {
            (Some(new), Some(old)) if new != old => Some(old),
            _ => None,
        };

        info!(university.id = %id, logo_replaced = replaced.is_some(), "University updated");
        Ok((university, replaced))
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "universities"))]
    pub async fn get_universities(db: &PgPool) -> Result<Vec<UniversityDetails>, AppError> {
        let universities = sqlx::query_as::<_, UniversityDetails>(&format!(
            "{} ORDER BY un.created_at DESC",
            SELECT_DETAILS
        ))
        .fetch_all(db)
        .await?;

        debug!(count = universities.len(), "Universities fetched");
        Ok(universities)
    }

    #[instrument(skip(db), fields(university.id = %id, db.operation = "SELECT", db.table = "universities"))]
    pub async fn get_university(
        db: &PgPool,
        id: UniversityId,
    ) -> Result<UniversityDetails, AppError> {
        sqlx::query_as::<_, UniversityDetails>(&format!("{} WHERE un.id = $1", SELECT_DETAILS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("University not found")))
    }

    #[instrument(skip(db), fields(university.id = %id, db.operation = "SELECT", db.table = "universities"))]
    pub async fn ensure_exists(db: &PgPool, id: UniversityId) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM universities WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(db)
        .await?;

        if exists {
            Ok(())
        } else {
            Err(AppError::not_found(anyhow::anyhow!("University not found")))
        }
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;
    use crate::modules::auth::service::AuthService;
    use crate::utils::records::{StatusTable, set_status};
    use axum::http::StatusCode;
    use unidocs_models::{AccountType, RecordStatus, users::SignupDto};

    async fn owner(pool: &PgPool, email: &str) -> UserId {
        AuthService::signup(
            pool,
            SignupDto {
                username: "owner".to_string(),
                account_type: AccountType::Owner,
                email: email.to_string(),
                password: "password123".to_string(),
            },
        )
        .await
        .unwrap()
    }

    fn form(name: &str) -> UniversityForm {
        UniversityForm {
            name: name.to_string(),
            description: "Public university".to_string(),
            address: "Mont Amba".to_string(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_and_get_university(pool: PgPool) {
        let owner_id = owner(&pool, "owner@example.com").await;
        let created = UniversityService::create_university(
            &pool,
            owner_id,
            form("UNIKIN"),
            Some("http://localhost:3000/files/universities/logo.png"),
        )
        .await
        .unwrap();

        let details = UniversityService::get_university(&pool, created.id).await.unwrap();
        assert_eq!(details.name, "UNIKIN");
        assert_eq!(details.user.0.id, owner_id);
        assert_eq!(details.status, RecordStatus::Active);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_keeps_logo_without_new_file(pool: PgPool) {
        let owner_id = owner(&pool, "owner@example.com").await;
        let created = UniversityService::create_university(
            &pool,
            owner_id,
            form("UNIKIN"),
            Some("http://localhost:3000/files/universities/logo.png"),
        )
        .await
        .unwrap();

        let (updated, replaced) =
            UniversityService::update_university(&pool, created.id, form("UNILU"), None)
                .await
                .unwrap();
        assert_eq!(updated.name, "UNILU");
        assert_eq!(updated.logo, created.logo);
        assert_eq!(replaced, None);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_reports_replaced_logo(pool: PgPool) {
        let owner_id = owner(&pool, "owner@example.com").await;
        let old_logo = "http://localhost:3000/files/universities/old.png";
        let new_logo = "http://localhost:3000/files/universities/new.png";
        let created =
            UniversityService::create_university(&pool, owner_id, form("UNIKIN"), Some(old_logo))
                .await
                .unwrap();

        let (updated, replaced) =
            UniversityService::update_university(&pool, created.id, form("UNIKIN"), Some(new_logo))
                .await
                .unwrap();
        assert_eq!(updated.logo.as_deref(), Some(new_logo));
        assert_eq!(replaced.as_deref(), Some(old_logo));

        let err = UniversityService::update_university(
            &pool,
            UniversityId::new(),
            form("UNIKIN"),
            None,
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_only_owner_may_update(pool: PgPool) {
        let owner_id = owner(&pool, "owner@example.com").await;
        let other = owner(&pool, "other@example.com").await;
        let created = UniversityService::create_university(&pool, owner_id, form("UNIKIN"), None)
            .await
            .unwrap();

        assert!(UniversityService::ensure_owner(&pool, created.id, owner_id).await.is_ok());
        let err = UniversityService::ensure_owner(&pool, created.id, other)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_ensure_exists(pool: PgPool) {
        let owner_id = owner(&pool, "owner@example.com").await;
        let created = UniversityService::create_university(&pool, owner_id, form("UNIKIN"), None)
            .await
            .unwrap();

        assert!(UniversityService::ensure_exists(&pool, created.id).await.is_ok());
        let err = UniversityService::ensure_exists(&pool, UniversityId::new())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_deactivate_university(pool: PgPool) {
        let owner_id = owner(&pool, "owner@example.com").await;
        let created = UniversityService::create_university(&pool, owner_id, form("UNIKIN"), None)
            .await
            .unwrap();

        set_status(&pool, StatusTable::Universities, created.id.into(), RecordStatus::Inactive)
            .await
            .unwrap();
        let details = UniversityService::get_university(&pool, created.id).await.unwrap();
        assert_eq!(details.status, RecordStatus::Inactive);

        let err = set_status(
            &pool,
            StatusTable::Universities,
            uuid::Uuid::new_v4(),
            RecordStatus::Active,
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
