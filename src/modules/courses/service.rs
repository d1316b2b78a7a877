use sqlx::PgPool;
use tracing::{debug, info, instrument};
use unidocs_core::AppError;
use unidocs_models::{
    courses::{Course, CourseDetails, CourseDto},
    ids::{CourseId, ProfessorId},
};
use unidocs_observability::track_record_created;

use crate::utils::sql::map_write_error;

const RETURNING: &str =
    "RETURNING id, name, ponderation, classroom_id, professor_id, status, created_at, updated_at";

const SELECT_DETAILS: &str = "SELECT co.id, co.name, co.ponderation, co.status, co.created_at, co.updated_at,
            json_build_object('id', c.id, 'name', c.name) AS classroom,
            json_build_object('id', p.id, 'userId', p.user_id, 'username', pu.username) AS professor
     FROM courses co
     JOIN classrooms c ON c.id = co.classroom_id
     JOIN professors p ON p.id = co.professor_id
     JOIN users pu ON pu.id = p.user_id";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, dto), fields(course.name = %dto.name, db.operation = "INSERT", db.table = "courses"))]
    pub async fn create_course(db: &PgPool, dto: CourseDto) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (name, ponderation, classroom_id, professor_id)
             VALUES ($1, $2, $3, $4) {}",
            RETURNING
        ))
        .bind(&dto.name)
        .bind(dto.ponderation)
        .bind(dto.classroom_id)
        .bind(dto.professor_id)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, "Course already exists"))?;

        track_record_created("course");
        info!(course.id = %course.id, classroom.id = %course.classroom_id, "Course created");
        Ok(course)
    }

    #[instrument(skip(db, dto), fields(course.id = %id, db.operation = "UPDATE", db.table = "courses"))]
    pub async fn update_course(db: &PgPool, id: CourseId, dto: CourseDto) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses
             SET name = $1, ponderation = $2, classroom_id = $3, professor_id = $4,
                 updated_at = NOW()
             WHERE id = $5 {}",
            RETURNING
        ))
        .bind(&dto.name)
        .bind(dto.ponderation)
        .bind(dto.classroom_id)
        .bind(dto.professor_id)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| map_write_error(e, "Course already exists"))?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        info!(course.id = %id, "Course updated");
        Ok(course)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_courses(db: &PgPool) -> Result<Vec<CourseDetails>, AppError> {
        let courses = sqlx::query_as::<_, CourseDetails>(&format!(
            "{} ORDER BY co.name ASC",
            SELECT_DETAILS
        ))
        .fetch_all(db)
        .await?;

        debug!(count = courses.len(), "Courses fetched");
        Ok(courses)
    }

    #[instrument(skip(db), fields(course.id = %id, db.operation = "SELECT", db.table = "courses"))]
    pub async fn get_course(db: &PgPool, id: CourseId) -> Result<CourseDetails, AppError> {
        sqlx::query_as::<_, CourseDetails>(&format!("{} WHERE co.id = $1", SELECT_DETAILS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))
    }

    #[instrument(skip(db), fields(professor.id = %professor_id, db.table = "courses"))]
    pub async fn get_courses_by_professor(
        db: &PgPool,
        professor_id: ProfessorId,
    ) -> Result<Vec<CourseDetails>, AppError> {
        let courses = sqlx::query_as::<_, CourseDetails>(&format!(
            "{} WHERE co.professor_id = $1 ORDER BY co.name ASC",
            SELECT_DETAILS
        ))
        .bind(professor_id)
        .fetch_all(db)
        .await?;

        Ok(courses)
    }
}
