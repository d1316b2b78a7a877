use sqlx::PgPool;
use tracing::{debug, info, instrument};
use unidocs_core::AppError;
use unidocs_models::{
    ids::{ProfessorId, UniversityId},
    professors::{CreateProfessorDto, Professor, ProfessorDetails, UpdateProfessorDto},
};
use unidocs_observability::track_record_created;

use crate::utils::sql::map_write_error;

const RETURNING: &str = "RETURNING id, user_id, university_id, status, created_at, updated_at";

const SELECT_DETAILS: &str = "SELECT p.id, p.status, p.created_at, p.updated_at,
            json_build_object('id', u.id, 'username', u.username, 'name', u.name,
                              'firstName', u.first_name) AS \"user\",
            json_build_object('id', un.id, 'name', un.name, 'description', un.description,
                              'logo', un.logo) AS university
     FROM professors p
     JOIN users u ON u.id = p.user_id
     JOIN universities un ON un.id = p.university_id";

pub struct ProfessorService;

impl ProfessorService {
    #[instrument(skip(db, dto), fields(user.id = %dto.user_id, db.operation = "INSERT", db.table = "professors"))]
    pub async fn create_professor(
        db: &PgPool,
        dto: CreateProfessorDto,
    ) -> Result<Professor, AppError> {
        let professor = sqlx::query_as::<_, Professor>(&format!(
            "INSERT INTO professors (user_id, university_id) VALUES ($1, $2) {}",
            RETURNING
        ))
        .bind(dto.user_id)
        .bind(dto.university_id)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, "This user is already registered as a professor"))?;

        track_record_created("professor");
        info!(professor.id = %professor.id, university.id = %professor.university_id, "Professor created");
        Ok(professor)
    }

    #[instrument(skip(db, dto), fields(professor.id = %id, db.operation = "UPDATE", db.table = "professors"))]
    pub async fn update_professor(
        db: &PgPool,
        id: ProfessorId,
        dto: UpdateProfessorDto,
    ) -> Result<Professor, AppError> {
        sqlx::query_as::<_, Professor>(&format!(
            "UPDATE professors SET university_id = $1, updated_at = NOW() WHERE id = $2 {}",
            RETURNING
        ))
        .bind(dto.university_id)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| map_write_error(e, "This user is already registered as a professor"))?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Professor not found")))
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "professors"))]
    pub async fn get_professors(db: &PgPool) -> Result<Vec<ProfessorDetails>, AppError> {
        let professors = sqlx::query_as::<_, ProfessorDetails>(&format!(
            "{} ORDER BY u.username ASC",
            SELECT_DETAILS
        ))
        .fetch_all(db)
        .await?;

        debug!(count = professors.len(), "Professors fetched");
        Ok(professors)
    }

    #[instrument(skip(db), fields(professor.id = %id, db.operation = "SELECT", db.table = "professors"))]
    pub async fn get_professor(db: &PgPool, id: ProfessorId) -> Result<ProfessorDetails, AppError> {
        sqlx::query_as::<_, ProfessorDetails>(&format!("{} WHERE p.id = $1", SELECT_DETAILS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Professor not found")))
    }

    #[instrument(skip(db), fields(university.id = %university_id, db.table = "professors"))]
    pub async fn get_professors_by_university(
        db: &PgPool,
        university_id: UniversityId,
    ) -> Result<Vec<ProfessorDetails>, AppError> {
        let professors = sqlx::query_as::<_, ProfessorDetails>(&format!(
            "{} WHERE p.university_id = $1 ORDER BY u.username ASC",
            SELECT_DETAILS
        ))
        .bind(university_id)
        .fetch_all(db)
        .await?;

        Ok(professors)
    }

    #[instrument(skip(db), fields(professor.id = %id, db.operation = "SELECT", db.table = "professors"))]
    pub async fn ensure_exists(db: &PgPool, id: ProfessorId) -> Result<(), AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM professors WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Professor not found")));
        }
        Ok(())
    }
}
