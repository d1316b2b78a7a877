use sqlx::PgPool;
use tracing::{debug, info, instrument};
use unidocs_core::AppError;
use unidocs_models::{
    classrooms::{Classroom, ClassroomDetails, CreateClassroomDto, UpdateClassroomDto},
    ids::{ClassroomId, DepartmentId, ProfessorId, UniversityId},
};
use unidocs_observability::track_record_created;

use crate::utils::sql::map_write_error;

const RETURNING: &str = "RETURNING id, name, department_id, status, created_at, updated_at";

const SELECT_DETAILS: &str = "SELECT c.id, c.name, c.status, c.created_at, c.updated_at,
            json_build_object('id', d.id, 'name', d.name, 'description', d.description) AS department
     FROM classrooms c
     JOIN departments d ON d.id = c.department_id";

pub struct ClassroomService;

impl ClassroomService {
    #[instrument(skip(db, dto), fields(classroom.name = %dto.name, db.operation = "INSERT", db.table = "classrooms"))]
    pub async fn create_classroom(
        db: &PgPool,
        dto: CreateClassroomDto,
    ) -> Result<Classroom, AppError> {
        let classroom = sqlx::query_as::<_, Classroom>(&format!(
            "INSERT INTO classrooms (name, department_id) VALUES ($1, $2) {}",
            RETURNING
        ))
        .bind(&dto.name)
        .bind(dto.department_id)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, "Classroom already exists"))?;

        track_record_created("classroom");
        info!(classroom.id = %classroom.id, "Classroom created");
        Ok(classroom)
    }

    #[instrument(skip(db, dto), fields(classroom.id = %id, db.operation = "UPDATE", db.table = "classrooms"))]
    pub async fn update_classroom(
        db: &PgPool,
        id: ClassroomId,
        dto: UpdateClassroomDto,
    ) -> Result<Classroom, AppError> {
        sqlx::query_as::<_, Classroom>(&format!(
            "UPDATE classrooms SET name = $1, updated_at = NOW() WHERE id = $2 {}",
            RETURNING
        ))
        .bind(&dto.name)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| map_write_error(e, "Classroom already exists"))?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Classroom not found")))
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "classrooms"))]
    pub async fn get_classrooms(db: &PgPool) -> Result<Vec<ClassroomDetails>, AppError> {
        let classrooms = sqlx::query_as::<_, ClassroomDetails>(&format!(
            "{} ORDER BY c.name ASC",
            SELECT_DETAILS
        ))
        .fetch_all(db)
        .await?;

        debug!(count = classrooms.len(), "Classrooms fetched");
        Ok(classrooms)
    }

    #[instrument(skip(db), fields(classroom.id = %id, db.operation = "SELECT", db.table = "classrooms"))]
    pub async fn get_classroom(db: &PgPool, id: ClassroomId) -> Result<ClassroomDetails, AppError> {
        sqlx::query_as::<_, ClassroomDetails>(&format!("{} WHERE c.id = $1", SELECT_DETAILS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Classroom not found")))
    }

    #[instrument(skip(db), fields(department.id = %department_id, db.table = "classrooms"))]
    pub async fn get_classrooms_by_department(
        db: &PgPool,
        department_id: DepartmentId,
    ) -> Result<Vec<ClassroomDetails>, AppError> {
        let classrooms = sqlx::query_as::<_, ClassroomDetails>(&format!(
            "{} WHERE c.department_id = $1 ORDER BY c.name ASC",
            SELECT_DETAILS
        ))
        .bind(department_id)
        .fetch_all(db)
        .await?;

        Ok(classrooms)
    }

    #[instrument(skip(db), fields(university.id = %university_id, db.table = "classrooms"))]
    pub async fn get_classrooms_by_university(
        db: &PgPool,
        university_id: UniversityId,
    ) -> Result<Vec<ClassroomDetails>, AppError> {
        let classrooms = sqlx::query_as::<_, ClassroomDetails>(&format!(
            "{} JOIN faculties f ON f.id = d.faculty_id
             WHERE f.university_id = $1 ORDER BY c.name ASC",
            SELECT_DETAILS
        ))
        .bind(university_id)
        .fetch_all(db)
        .await?;

        Ok(classrooms)
    }

    /// Distinct classrooms in which the professor teaches at least one course.
    #[instrument(skip(db), fields(professor.id = %professor_id, db.table = "classrooms"))]
    pub async fn get_classrooms_by_professor(
        db: &PgPool,
        professor_id: ProfessorId,
    ) -> Result<Vec<ClassroomDetails>, AppError> {
        let classrooms = sqlx::query_as::<_, ClassroomDetails>(&format!(
            "{} WHERE c.id IN (SELECT classroom_id FROM courses WHERE professor_id = $1)
             ORDER BY c.name ASC",
            SELECT_DETAILS
        ))
        .bind(professor_id)
        .fetch_all(db)
        .await?;

        Ok(classrooms)
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;
    use crate::utils::fixtures;
    use axum::http::StatusCode;
    use unidocs_models::AccountType;

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_classroom_joins_department(pool: PgPool) {
        let campus = fixtures::campus(&pool).await;

        let classroom = ClassroomService::create_classroom(
            &pool,
            CreateClassroomDto {
                name: "L3".to_string(),
                department_id: campus.department,
            },
        )
        .await
        .unwrap();

        let details = ClassroomService::get_classroom(&pool, classroom.id).await.unwrap();
        assert_eq!(details.department.0.name, "Informatique");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_professor_classrooms_are_distinct(pool: PgPool) {
        let campus = fixtures::campus(&pool).await;
        let l3 = fixtures::classroom(&pool, campus.department, "L3").await;
        let user = fixtures::user(&pool, "prof@unikin.cd", AccountType::Professor).await;
        let professor = fixtures::professor(&pool, user, campus.university).await;

        fixtures::course(&pool, campus.classroom, professor, "Algebre", 4).await;
        fixtures::course(&pool, campus.classroom, professor, "Analyse", 5).await;
        fixtures::course(&pool, l3, professor, "Compilation", 6).await;

        let classrooms = ClassroomService::get_classrooms_by_professor(&pool, professor)
            .await
            .unwrap();
        let names: Vec<_> = classrooms.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["L2", "L3"]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_classrooms_by_university(pool: PgPool) {
        let campus = fixtures::campus(&pool).await;
        let classrooms = ClassroomService::get_classrooms_by_university(&pool, campus.university)
            .await
            .unwrap();
        assert_eq!(classrooms.len(), 1);

        let none = ClassroomService::get_classrooms_by_university(&pool, UniversityId::new())
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_missing_classroom(pool: PgPool) {
        let err = ClassroomService::update_classroom(
            &pool,
            ClassroomId::new(),
            UpdateClassroomDto {
                name: "L1".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
