//! Academic years. A university has at most one active year at a time: creating
//! or activating a year deactivates the others inside the same transaction, and
//! the partial unique index `idx_academic_years_one_active` backs this up.

use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, info, instrument};
use unidocs_core::AppError;
use unidocs_models::{
    RecordStatus,
    academic_years::{
        AcademicYear, AcademicYearDetails, CreateAcademicYearDto, UpdateAcademicYearDto,
    },
    ids::{AcademicYearId, UniversityId},
};
use unidocs_observability::track_record_created;

use crate::utils::sql::map_write_error;

const RETURNING: &str = "RETURNING id, name, university_id, status, created_at, updated_at";

const SELECT_DETAILS: &str = "SELECT ay.id, ay.name, ay.status, ay.created_at, ay.updated_at,
            json_build_object('id', un.id, 'name', un.name, 'description', un.description,
                              'logo', un.logo) AS university
     FROM academic_years ay
     JOIN universities un ON un.id = ay.university_id";

pub struct AcademicYearService;

impl AcademicYearService {
    async fn deactivate_others(
        tx: &mut Transaction<'_, Postgres>,
        university_id: UniversityId,
        keep: Option<AcademicYearId>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE academic_years SET status = 'inactive', updated_at = NOW()
             WHERE university_id = $1 AND status = 'active' AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(university_id)
        .bind(keep)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(db, dto), fields(academic_year.name = %dto.name, db.operation = "INSERT", db.table = "academic_years"))]
    pub async fn create_academic_year(
        db: &PgPool,
        dto: CreateAcademicYearDto,
    ) -> Result<AcademicYear, AppError> {
        let mut tx = db.begin().await?;

        let deactivated = Self::deactivate_others(&mut tx, dto.university_id, None).await?;
        let academic_year = sqlx::query_as::<_, AcademicYear>(&format!(
            "INSERT INTO academic_years (name, university_id, status) VALUES ($1, $2, 'active') {}",
            RETURNING
        ))
        .bind(&dto.name)
        .bind(dto.university_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "An active academic year already exists"))?;

        tx.commit().await?;

        track_record_created("academic_year");
        info!(
            academic_year.id = %academic_year.id,
            university.id = %academic_year.university_id,
            deactivated,
            "Academic year created"
        );
        Ok(academic_year)
    }

    #[instrument(skip(db, dto), fields(academic_year.id = %id, db.operation = "UPDATE", db.table = "academic_years"))]
    pub async fn update_academic_year(
        db: &PgPool,
        id: AcademicYearId,
        dto: UpdateAcademicYearDto,
    ) -> Result<AcademicYear, AppError> {
        sqlx::query_as::<_, AcademicYear>(&format!(
            "UPDATE academic_years SET name = $1, updated_at = NOW() WHERE id = $2 {}",
            RETURNING
        ))
        .bind(&dto.name)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Academic year not found")))
    }

    #[instrument(skip(db), fields(academic_year.id = %id, db.operation = "UPDATE", db.table = "academic_years"))]
    pub async fn activate_academic_year(
        db: &PgPool,
        id: AcademicYearId,
    ) -> Result<AcademicYear, AppError> {
        let mut tx = db.begin().await?;

        let university_id = sqlx::query_scalar::<_, UniversityId>(
            "SELECT university_id FROM academic_years WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Academic year not found")))?;

        let deactivated = Self::deactivate_others(&mut tx, university_id, Some(id)).await?;
        let academic_year = sqlx::query_as::<_, AcademicYear>(&format!(
            "UPDATE academic_years SET status = $1, updated_at = NOW() WHERE id = $2 {}",
            RETURNING
        ))
        .bind(RecordStatus::Active)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(academic_year.id = %id, deactivated, "Academic year activated");
        Ok(academic_year)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "academic_years"))]
    pub async fn get_academic_years(db: &PgPool) -> Result<Vec<AcademicYearDetails>, AppError> {
        let years = sqlx::query_as::<_, AcademicYearDetails>(&format!(
            "{} ORDER BY ay.created_at DESC",
            SELECT_DETAILS
        ))
        .fetch_all(db)
        .await?;

        debug!(count = years.len(), "Academic years fetched");
        Ok(years)
    }

    #[instrument(skip(db), fields(academic_year.id = %id, db.operation = "SELECT", db.table = "academic_years"))]
    pub async fn get_academic_year(
        db: &PgPool,
        id: AcademicYearId,
    ) -> Result<AcademicYearDetails, AppError> {
        sqlx::query_as::<_, AcademicYearDetails>(&format!("{} WHERE ay.id = $1", SELECT_DETAILS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Academic year not found")))
    }

    /// The university's active year, if any.
    #[instrument(skip(db), fields(university.id = %university_id, db.table = "academic_years"))]
    pub async fn get_active_academic_year(
        db: &PgPool,
        university_id: UniversityId,
    ) -> Result<Option<AcademicYear>, AppError> {
        let year = sqlx::query_as::<_, AcademicYear>(
            "SELECT id, name, university_id, status, created_at, updated_at
             FROM academic_years WHERE university_id = $1 AND status = 'active'",
        )
        .bind(university_id)
        .fetch_optional(db)
        .await?;

        Ok(year)
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;
    use crate::utils::fixtures;
    use crate::utils::records::{StatusTable, set_status};
    use unidocs_models::AccountType;

    fn year(name: &str, university_id: UniversityId) -> CreateAcademicYearDto {
        CreateAcademicYearDto {
            name: name.to_string(),
            university_id,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_deactivates_previous_year(pool: PgPool) {
        let owner = fixtures::user(&pool, "owner@unikin.cd", AccountType::Owner).await;
        let university = fixtures::university(&pool, owner, "UNIKIN").await;

        let first = AcademicYearService::create_academic_year(&pool, year("2023-2024", university))
            .await
            .unwrap();
        let second = AcademicYearService::create_academic_year(&pool, year("2024-2025", university))
            .await
            .unwrap();

        let first = AcademicYearService::get_academic_year(&pool, first.id).await.unwrap();
        assert_eq!(first.status, RecordStatus::Inactive);
        assert_eq!(second.status, RecordStatus::Active);

        let active = AcademicYearService::get_active_academic_year(&pool, university)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.id, second.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_activation_is_scoped_to_university(pool: PgPool) {
        let owner = fixtures::user(&pool, "owner@unikin.cd", AccountType::Owner).await;
        let unikin = fixtures::university(&pool, owner, "UNIKIN").await;
        let unilu = fixtures::university(&pool, owner, "UNILU").await;

        let old = AcademicYearService::create_academic_year(&pool, year("2023-2024", unikin))
            .await
            .unwrap();
        let current = AcademicYearService::create_academic_year(&pool, year("2024-2025", unikin))
            .await
            .unwrap();
        let other = AcademicYearService::create_academic_year(&pool, year("2024-2025", unilu))
            .await
            .unwrap();

        let reactivated = AcademicYearService::activate_academic_year(&pool, old.id)
            .await
            .unwrap();
        assert_eq!(reactivated.status, RecordStatus::Active);

        let current = AcademicYearService::get_academic_year(&pool, current.id).await.unwrap();
        let other = AcademicYearService::get_academic_year(&pool, other.id).await.unwrap();
        assert_eq!(current.status, RecordStatus::Inactive);
        assert_eq!(other.status, RecordStatus::Active);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_no_active_year_after_deactivation(pool: PgPool) {
        let owner = fixtures::user(&pool, "owner@unikin.cd", AccountType::Owner).await;
        let university = fixtures::university(&pool, owner, "UNIKIN").await;
        let created = AcademicYearService::create_academic_year(&pool, year("2024-2025", university))
            .await
            .unwrap();

        set_status(&pool, StatusTable::AcademicYears, created.id.into(), RecordStatus::Inactive)
            .await
            .unwrap();

        let active = AcademicYearService::get_active_academic_year(&pool, university)
            .await
            .unwrap();
        assert!(active.is_none());
    }
}
