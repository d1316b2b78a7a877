//! Row builders for database tests.

use sqlx::PgPool;
use unidocs_models::{
    AccountType,
    ids::{
        AcademicYearId, ClassroomId, CourseId, DepartmentId, FacultyId, ProfessorId, StudentId,
        UniversityId, UserId,
    },
};

pub async fn user(pool: &PgPool, email: &str, account_type: AccountType) -> UserId {
    sqlx::query_scalar(
        "INSERT INTO users (email, password_hash, username, account_type, name, first_name)
         VALUES ($1, 'not-a-hash', $2, $3, 'Kabamba', 'Grace') RETURNING id",
    )
    .bind(email)
    .bind(email.split('@').next().unwrap_or(email))
    .bind(account_type)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn university(pool: &PgPool, owner: UserId, name: &str) -> UniversityId {
    sqlx::query_scalar("INSERT INTO universities (name, user_id) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(owner)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn faculty(pool: &PgPool, university: UniversityId, name: &str) -> FacultyId {
    sqlx::query_scalar(
        "INSERT INTO faculties (name, university_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(university)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn department(pool: &PgPool, faculty: FacultyId, name: &str) -> DepartmentId {
    sqlx::query_scalar(
        "INSERT INTO departments (name, faculty_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(faculty)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn classroom(pool: &PgPool, department: DepartmentId, name: &str) -> ClassroomId {
    sqlx::query_scalar(
        "INSERT INTO classrooms (name, department_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(department)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn academic_year(pool: &PgPool, university: UniversityId, name: &str) -> AcademicYearId {
    sqlx::query_scalar(
        "INSERT INTO academic_years (name, university_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(university)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn professor(pool: &PgPool, user: UserId, university: UniversityId) -> ProfessorId {
    sqlx::query_scalar(
        "INSERT INTO professors (user_id, university_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(user)
    .bind(university)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn course(
    pool: &PgPool,
    classroom: ClassroomId,
    professor: ProfessorId,
    name: &str,
    ponderation: i32,
) -> CourseId {
    sqlx::query_scalar(
        "INSERT INTO courses (name, ponderation, classroom_id, professor_id)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(name)
    .bind(ponderation)
    .bind(classroom)
    .bind(professor)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// A university with one faculty, department and classroom.
pub struct Campus {
    pub owner: UserId,
    pub university: UniversityId,
    pub faculty: FacultyId,
    pub department: DepartmentId,
    pub classroom: ClassroomId,
}

pub async fn campus(pool: &PgPool) -> Campus {
    let owner = user(pool, "owner@unikin.cd", AccountType::Owner).await;
    let university = university(pool, owner, "UNIKIN").await;
    let faculty = faculty(pool, university, "Sciences").await;
    let department = department(pool, faculty, "Informatique").await;
    let classroom = classroom(pool, department, "L2").await;

    Campus {
        owner,
        university,
        faculty,
        department,
        classroom,
    }
}

pub async fn student(pool: &PgPool, user: UserId, campus: &Campus) -> StudentId {
    sqlx::query_scalar(
        "INSERT INTO students (user_id, university_id, faculty_id, department_id, classroom_id)
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(user)
    .bind(campus.university)
    .bind(campus.faculty)
    .bind(campus.department)
    .bind(campus.classroom)
    .fetch_one(pool)
    .await
    .unwrap()
}
