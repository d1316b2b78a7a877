use sqlx::PgPool;
use tracing::{debug, info, instrument};
use unidocs_core::AppError;
use unidocs_models::{
    departments::{CreateDepartmentDto, Department, DepartmentDetails, UpdateDepartmentDto},
    ids::{DepartmentId, UniversityId},
};
use unidocs_observability::track_record_created;

use crate::utils::sql::map_write_error;

const RETURNING: &str =
    "RETURNING id, name, description, faculty_id, status, created_at, updated_at";

const SELECT_DETAILS: &str = "SELECT d.id, d.name, d.description, d.status, d.created_at, d.updated_at,
            json_build_object('id', f.id, 'name', f.name, 'description', f.description) AS faculty
     FROM departments d
     JOIN faculties f ON f.id = d.faculty_id";

pub struct DepartmentService;

impl DepartmentService {
    #[instrument(skip(db, dto), fields(department.name = %dto.name, db.operation = "INSERT", db.table = "departments"))]
    pub async fn create_department(
        db: &PgPool,
        dto: CreateDepartmentDto,
    ) -> Result<Department, AppError> {
        let department = sqlx::query_as::<_, Department>(&format!(
            "INSERT INTO departments (name, description, faculty_id) VALUES ($1, $2, $3) {}",
            RETURNING
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.faculty_id)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, "Department already exists"))?;

        track_record_created("department");
        info!(department.id = %department.id, faculty.id = %department.faculty_id, "Department created");
        Ok(department)
    }

    #[instrument(skip(db, dto), fields(department.id = %id, db.operation = "UPDATE", db.table = "departments"))]
    pub async fn update_department(
        db: &PgPool,
        id: DepartmentId,
        dto: UpdateDepartmentDto,
    ) -> Result<Department, AppError> {
        let department = sqlx::query_as::<_, Department>(&format!(
            "UPDATE departments SET name = $1, description = $2, updated_at = NOW()
             WHERE id = $3 {}",
            RETURNING
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| map_write_error(e, "Department already exists"))?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Department not found")))?;

        info!(department.id = %id, "Department updated");
        Ok(department)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "departments"))]
    pub async fn get_departments(db: &PgPool) -> Result<Vec<DepartmentDetails>, AppError> {
        let departments = sqlx::query_as::<_, DepartmentDetails>(&format!(
            "{} ORDER BY d.name ASC",
            SELECT_DETAILS
        ))
        .fetch_all(db)
        .await?;

        debug!(count = departments.len(), "Departments fetched");
        Ok(departments)
    }

    #[instrument(skip(db), fields(department.id = %id, db.operation = "SELECT", db.table = "departments"))]
    pub async fn get_department(
        db: &PgPool,
        id: DepartmentId,
    ) -> Result<DepartmentDetails, AppError> {
        sqlx::query_as::<_, DepartmentDetails>(&format!("{} WHERE d.id = $1", SELECT_DETAILS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Department not found")))
    }

    /// Departments reached through the university's faculties.
    #[instrument(skip(db), fields(university.id = %university_id, db.operation = "SELECT", db.table = "departments"))]
    pub async fn get_departments_by_university(
        db: &PgPool,
        university_id: UniversityId,
    ) -> Result<Vec<DepartmentDetails>, AppError> {
        let departments = sqlx::query_as::<_, DepartmentDetails>(&format!(
            "{} WHERE f.university_id = $1 ORDER BY d.name ASC",
            SELECT_DETAILS
        ))
        .bind(university_id)
        .fetch_all(db)
        .await?;

        Ok(departments)
    }

    #[instrument(skip(db), fields(department.id = %id, db.operation = "SELECT", db.table = "departments"))]
    pub async fn ensure_exists(db: &PgPool, id: DepartmentId) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM departments WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(db)
        .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Department not found")));
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;
    use crate::utils::fixtures;
    use axum::http::StatusCode;
    use unidocs_models::AccountType;

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_and_update_department(pool: PgPool) {
        let campus = fixtures::campus(&pool).await;

        let department = DepartmentService::create_department(
            &pool,
            CreateDepartmentDto {
                name: "Mathematiques".to_string(),
                faculty_id: campus.faculty,
                description: String::new(),
            },
        )
        .await
        .unwrap();

        let updated = DepartmentService::update_department(
            &pool,
            department.id,
            UpdateDepartmentDto {
                name: "Mathematiques appliquees".to_string(),
                description: "Maths".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Mathematiques appliquees");

        let details = DepartmentService::get_department(&pool, department.id).await.unwrap();
        assert_eq!(details.faculty.0.id, campus.faculty);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_departments_by_university_cross_faculties(pool: PgPool) {
        let campus = fixtures::campus(&pool).await;
        let law = fixtures::faculty(&pool, campus.university, "Droit").await;
        fixtures::department(&pool, law, "Droit public").await;

        let other_owner = fixtures::user(&pool, "owner@unilu.cd", AccountType::Owner).await;
        let unilu = fixtures::university(&pool, other_owner, "UNILU").await;
        let unilu_faculty = fixtures::faculty(&pool, unilu, "Medecine").await;
        fixtures::department(&pool, unilu_faculty, "Chirurgie").await;

        let departments = DepartmentService::get_departments_by_university(&pool, campus.university)
            .await
            .unwrap();
        let names: Vec<_> = departments.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Droit public", "Informatique"]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_missing_department(pool: PgPool) {
        let err = DepartmentService::ensure_exists(&pool, DepartmentId::new())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
