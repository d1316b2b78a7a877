use sqlx::PgPool;
use tracing::{debug, info, instrument};
use unidocs_core::AppError;
use unidocs_models::{
    ids::{StudentId, UniversityId},
    students::{CreateStudentDto, Student, StudentDetails, UpdateStudentDto},
};
use unidocs_observability::track_record_created;

use crate::utils::sql::map_write_error;

const RETURNING: &str = "RETURNING id, user_id, university_id, faculty_id, department_id,
            classroom_id, status, created_at, updated_at";

const SELECT_DETAILS: &str = "SELECT s.id, s.status, s.created_at, s.updated_at,
            json_build_object('id', u.id, 'username', u.username, 'name', u.name,
                              'firstName', u.first_name) AS \"user\",
            json_build_object('id', un.id, 'name', un.name, 'description', un.description,
                              'logo', un.logo) AS university,
            json_build_object('id', f.id, 'name', f.name, 'description', f.description) AS faculty,
            json_build_object('id', d.id, 'name', d.name, 'description', d.description) AS department,
            json_build_object('id', c.id, 'name', c.name) AS classroom
     FROM students s
     JOIN users u ON u.id = s.user_id
     JOIN universities un ON un.id = s.university_id
     JOIN faculties f ON f.id = s.faculty_id
     JOIN departments d ON d.id = s.department_id
     JOIN classrooms c ON c.id = s.classroom_id";

const DUPLICATE_STUDENT: &str = "This user is already registered as a student";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, dto), fields(user.id = %dto.user_id, db.operation = "INSERT", db.table = "students"))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (user_id, university_id, faculty_id, department_id, classroom_id)
             VALUES ($1, $2, $3, $4, $5) {}",
            RETURNING
        ))
        .bind(dto.user_id)
        .bind(dto.university_id)
        .bind(dto.faculty_id)
        .bind(dto.department_id)
        .bind(dto.classroom_id)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE_STUDENT))?;

        track_record_created("student");
        info!(student.id = %student.id, classroom.id = %student.classroom_id, "Student created");
        Ok(student)
    }

    #[instrument(skip(db, dto), fields(student.id = %id, db.operation = "UPDATE", db.table = "students"))]
    pub async fn update_student(
        db: &PgPool,
        id: StudentId,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students
             SET university_id = $1, faculty_id = $2, department_id = $3, classroom_id = $4,
                 updated_at = NOW()
             WHERE id = $5 {}",
            RETURNING
        ))
        .bind(dto.university_id)
        .bind(dto.faculty_id)
        .bind(dto.department_id)
        .bind(dto.classroom_id)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE_STUDENT))?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        info!(student.id = %id, "Student enrolment updated");
        Ok(student)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn get_students(db: &PgPool) -> Result<Vec<StudentDetails>, AppError> {
        let students = sqlx::query_as::<_, StudentDetails>(&format!(
            "{} ORDER BY u.username ASC",
            SELECT_DETAILS
        ))
        .fetch_all(db)
        .await?;

        debug!(count = students.len(), "Students fetched");
        Ok(students)
    }

    #[instrument(skip(db), fields(student.id = %id, db.operation = "SELECT", db.table = "students"))]
    pub async fn get_student(db: &PgPool, id: StudentId) -> Result<StudentDetails, AppError> {
        sqlx::query_as::<_, StudentDetails>(&format!("{} WHERE s.id = $1", SELECT_DETAILS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db), fields(university.id = %university_id, db.table = "students"))]
    pub async fn get_students_by_university(
        db: &PgPool,
        university_id: UniversityId,
    ) -> Result<Vec<StudentDetails>, AppError> {
        let students = sqlx::query_as::<_, StudentDetails>(&format!(
            "{} WHERE s.university_id = $1 ORDER BY u.username ASC",
            SELECT_DETAILS
        ))
        .bind(university_id)
        .fetch_all(db)
        .await?;

        Ok(students)
    }
}
