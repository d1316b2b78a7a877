use sqlx::PgPool;
use tracing::{debug, info, instrument};
use unidocs_core::AppError;
use unidocs_models::{
    cotations::{Cotation, CotationDetails, CreateCotationDto, UpdateCotationDto},
    ids::CotationId,
};
use unidocs_observability::track_record_created;

use crate::utils::sql::map_write_error;

pub const ALREADY_GRADED: &str = "This student has already been graded in this course";

const RETURNING: &str = "RETURNING id, total, rating, course_id, student_id, academic_year_id,
            created_at, updated_at";

const SELECT_DETAILS: &str = "SELECT ct.id, ct.total, ct.rating, ct.created_at, ct.updated_at,
            json_build_object('id', co.id, 'name', co.name, 'ponderation', co.ponderation) AS course,
            json_build_object('id', ay.id, 'name', ay.name, 'status', ay.status) AS academic_year,
            json_build_object('id', s.id, 'userId', s.user_id, 'username', u.username) AS student
     FROM cotations ct
     JOIN courses co ON co.id = ct.course_id
     JOIN academic_years ay ON ay.id = ct.academic_year_id
     JOIN students s ON s.id = ct.student_id
     JOIN users u ON u.id = s.user_id";

pub struct CotationService;

impl CotationService {
    /// One cotation per (student, course, academic year).
    #[instrument(skip(db, dto), fields(student.id = %dto.student_id, course.id = %dto.course_id, db.operation = "INSERT", db.table = "cotations"))]
    pub async fn create_cotation(
        db: &PgPool,
        dto: CreateCotationDto,
    ) -> Result<Cotation, AppError> {
        let cotation = sqlx::query_as::<_, Cotation>(&format!(
            "INSERT INTO cotations (total, rating, course_id, student_id, academic_year_id)
             VALUES ($1, $2, $3, $4, $5) {}",
            RETURNING
        ))
        .bind(dto.total)
        .bind(dto.rating)
        .bind(dto.course_id)
        .bind(dto.student_id)
        .bind(dto.academic_year_id)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, ALREADY_GRADED))?;

        track_record_created("cotation");
        info!(cotation.id = %cotation.id, "Cotation recorded");
        Ok(cotation)
    }

    #[instrument(skip(db, dto), fields(cotation.id = %id, db.operation = "UPDATE", db.table = "cotations"))]
    pub async fn update_cotation(
        db: &PgPool,
        id: CotationId,
        dto: UpdateCotationDto,
    ) -> Result<Cotation, AppError> {
        let cotation = sqlx::query_as::<_, Cotation>(&format!(
            "UPDATE cotations SET total = $1, rating = $2, updated_at = NOW() WHERE id = $3 {}",
            RETURNING
        ))
        .bind(dto.total)
        .bind(dto.rating)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| map_write_error(e, ALREADY_GRADED))?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Cotation not found")))?;

        info!(cotation.id = %id, total = cotation.total, rating = cotation.rating, "Cotation updated");
        Ok(cotation)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "cotations"))]
    pub async fn get_cotations(db: &PgPool) -> Result<Vec<CotationDetails>, AppError> {
        let cotations = sqlx::query_as::<_, CotationDetails>(&format!(
            "{} ORDER BY ct.created_at DESC",
            SELECT_DETAILS
        ))
        .fetch_all(db)
        .await?;

        debug!(count = cotations.len(), "Cotations fetched");
        Ok(cotations)
    }

    #[instrument(skip(db), fields(cotation.id = %id, db.operation = "SELECT", db.table = "cotations"))]
    pub async fn get_cotation(db: &PgPool, id: CotationId) -> Result<CotationDetails, AppError> {
        sqlx::query_as::<_, CotationDetails>(&format!("{} WHERE ct.id = $1", SELECT_DETAILS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Cotation not found")))
    }
}
