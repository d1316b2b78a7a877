use sqlx::PgPool;
use tracing::{debug, info, instrument};
use unidocs_core::AppError;
use unidocs_models::{
    faculties::{CreateFacultyDto, Faculty, FacultyDetails, UpdateFacultyDto},
    ids::{FacultyId, UniversityId},
};
use unidocs_observability::track_record_created;

use crate::utils::sql::map_write_error;

const RETURNING: &str =
    "RETURNING id, name, description, university_id, status, created_at, updated_at";

const SELECT_DETAILS: &str = "SELECT f.id, f.name, f.description, f.status, f.created_at, f.updated_at,
            json_build_object('id', un.id, 'name', un.name, 'description', un.description,
                              'logo', un.logo) AS university
     FROM faculties f
     JOIN universities un ON un.id = f.university_id";

pub struct FacultyService;

impl FacultyService {
    #[instrument(skip(db, dto), fields(faculty.name = %dto.name, db.operation = "INSERT", db.table = "faculties"))]
    pub async fn create_faculty(db: &PgPool, dto: CreateFacultyDto) -> Result<Faculty, AppError> {
        let faculty = sqlx::query_as::<_, Faculty>(&format!(
            "INSERT INTO faculties (name, description, university_id) VALUES ($1, $2, $3) {}",
            RETURNING
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.university_id)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, "Faculty already exists"))?;

        track_record_created("faculty");
        info!(faculty.id = %faculty.id, university.id = %faculty.university_id, "Faculty created");
        Ok(faculty)
    }

    #[instrument(skip(db, dto), fields(faculty.id = %id, db.operation = "UPDATE", db.table = "faculties"))]
    pub async fn update_faculty(
        db: &PgPool,
        id: FacultyId,
        dto: UpdateFacultyDto,
    ) -> Result<Faculty, AppError> {
        let faculty = sqlx::query_as::<_, Faculty>(&format!(
            "UPDATE faculties SET name = $1, description = $2, updated_at = NOW()
             WHERE id = $3 {}",
            RETURNING
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| map_write_error(e, "Faculty already exists"))?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Faculty not found")))?;

        info!(faculty.id = %id, "Faculty updated");
        Ok(faculty)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "faculties"))]
    pub async fn get_faculties(db: &PgPool) -> Result<Vec<FacultyDetails>, AppError> {
        let faculties = sqlx::query_as::<_, FacultyDetails>(&format!(
            "{} ORDER BY f.name ASC",
            SELECT_DETAILS
        ))
        .fetch_all(db)
        .await?;

        debug!(count = faculties.len(), "Faculties fetched");
        Ok(faculties)
    }

    #[instrument(skip(db), fields(faculty.id = %id, db.operation = "SELECT", db.table = "faculties"))]
    pub async fn get_faculty(db: &PgPool, id: FacultyId) -> Result<FacultyDetails, AppError> {
        sqlx::query_as::<_, FacultyDetails>(&format!("{} WHERE f.id = $1", SELECT_DETAILS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Faculty not found")))
    }

    #[instrument(skip(db), fields(university.id = %university_id, db.operation = "SELECT", db.table = "faculties"))]
    pub async fn get_faculties_by_university(
        db: &PgPool,
        university_id: UniversityId,
    ) -> Result<Vec<FacultyDetails>, AppError> {
        let faculties = sqlx::query_as::<_, FacultyDetails>(&format!(
            "{} WHERE f.university_id = $1 ORDER BY f.name ASC",
            SELECT_DETAILS
        ))
        .bind(university_id)
        .fetch_all(db)
        .await?;

        Ok(faculties)
    }
}
