//! Documents and transcript ("releve de cotes") generation.

use sqlx::{FromRow, PgPool, types::Json};
use tracing::{debug, info, instrument, warn};
use unidocs_core::AppError;
use unidocs_models::{
    AcademicYearSummary, ClassroomSummary, DocumentType, FacultySummary,
    documents::{
        Document, DocumentDetails, DocumentForm, Releve, ReleveCourse, ReleveStudent,
        ReleveUniversity,
    },
    ids::{AcademicYearId, ClassroomId, DocumentId, StudentId, UniversityId, UserId},
};
use unidocs_observability::track_document_generated;

use crate::modules::academic_years::service::AcademicYearService;
use crate::utils::sql::map_write_error;

const RETURNING: &str = "RETURNING id, name, document_type, user_id, university_id, images, releve,
            status, created_at, updated_at";

const SELECT_DETAILS: &str = "SELECT doc.id, doc.name, doc.document_type, doc.images, doc.releve,
            doc.status, doc.created_at, doc.updated_at,
            json_build_object('id', u.id, 'username', u.username, 'name', u.name,
                              'firstName', u.first_name) AS \"user\",
            json_build_object('id', un.id, 'name', un.name, 'description', un.description,
                              'logo', un.logo) AS university
     FROM documents doc
     JOIN users u ON u.id = doc.user_id
     JOIN universities un ON un.id = doc.university_id";

/// What gets stored alongside the document row.
#[derive(Debug, Clone)]
pub enum DocumentContent {
    Images(Vec<String>),
    Releve(Releve),
}

impl DocumentContent {
    pub fn document_type(&self) -> DocumentType {
        match self {
            DocumentContent::Images(_) => DocumentType::Image,
            DocumentContent::Releve(_) => DocumentType::ReleveDeCotes,
        }
    }
}

/// The student's profile with the faculty and classroom of their enrolment.
#[derive(Debug, FromRow)]
struct Enrolment {
    #[sqlx(flatten)]
    student: ReleveStudent,
    faculty: Json<FacultySummary>,
    classroom: Json<ClassroomSummary>,
}

pub struct DocumentService;

impl DocumentService {
    /// Collects everything a transcript needs for `user_id` at `university_id`.
    ///
    /// Missing student record, university or active academic year are 422s:
    /// the request is well formed but cannot be fulfilled.
    #[instrument(skip(db), fields(user.id = %user_id, university.id = %university_id))]
    pub async fn build_releve(
        db: &PgPool,
        user_id: UserId,
        university_id: UniversityId,
    ) -> Result<Releve, AppError> {
        let enrolment = sqlx::query_as::<_, Enrolment>(
            "SELECT u.id AS user_id, s.id AS student_id, u.username, u.email, u.name,
                    u.first_name, u.sexe, u.age, u.telephone, u.address,
                    json_build_object('id', f.id, 'name', f.name, 'description', f.description) AS faculty,
                    json_build_object('id', c.id, 'name', c.name) AS classroom
             FROM students s
             JOIN users u ON u.id = s.user_id
             JOIN faculties f ON f.id = s.faculty_id
             JOIN classrooms c ON c.id = s.classroom_id
             WHERE s.user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            warn!(user.id = %user_id, "Transcript requested for a user without student record");
            AppError::unprocessable(anyhow::anyhow!("Student data not found for the given userId"))
        })?;

        let university = sqlx::query_as::<_, ReleveUniversity>(
            "SELECT id, name, description, address, logo FROM universities WHERE id = $1",
        )
        .bind(university_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            AppError::unprocessable(anyhow::anyhow!(
                "University data not found for the given universityId"
            ))
        })?;

        let academic_year = AcademicYearService::get_active_academic_year(db, university_id)
            .await?
            .ok_or_else(|| {
                AppError::unprocessable(anyhow::anyhow!(
                    "Active academic year not found for the given universityId"
                ))
            })?;

        let classroom = enrolment.classroom.0;
        let courses = Self::graded_courses(
            db,
            classroom.id,
            enrolment.student.student_id,
            academic_year.id,
        )
        .await?;

        debug!(courses = courses.len(), "Transcript data collected");

        Ok(Releve::assemble(
            enrolment.student,
            university,
            AcademicYearSummary {
                id: academic_year.id,
                name: academic_year.name,
                status: academic_year.status,
            },
            enrolment.faculty.0,
            classroom,
            courses,
        ))
    }

    /// Courses of the classroom that carry a cotation for this student and year.
    async fn graded_courses(
        db: &PgPool,
        classroom_id: ClassroomId,
        student_id: StudentId,
        academic_year_id: AcademicYearId,
    ) -> Result<Vec<ReleveCourse>, AppError> {
        let courses = sqlx::query_as::<_, ReleveCourse>(
            "SELECT co.name AS course_name, co.ponderation AS course_ponderation,
                    ct.rating AS student_rating, ct.total
             FROM courses co
             JOIN cotations ct ON ct.course_id = co.id
             WHERE co.classroom_id = $1 AND ct.student_id = $2 AND ct.academic_year_id = $3
             ORDER BY co.name ASC",
        )
        .bind(classroom_id)
        .bind(student_id)
        .bind(academic_year_id)
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    #[instrument(skip(db, form, content), fields(document.name = %form.name, db.operation = "INSERT", db.table = "documents"))]
    pub async fn create_document(
        db: &PgPool,
        form: &DocumentForm,
        content: DocumentContent,
    ) -> Result<Document, AppError> {
        let document_type = content.document_type();
        let (images, releve) = match content {
            DocumentContent::Images(images) => (images, None),
            DocumentContent::Releve(releve) => (Vec::new(), Some(Json(releve))),
        };

        let document = sqlx::query_as::<_, Document>(&format!(
            "INSERT INTO documents (name, document_type, user_id, university_id, images, releve)
             VALUES ($1, $2, $3, $4, $5, $6) {}",
            RETURNING
        ))
        .bind(&form.name)
        .bind(document_type)
        .bind(form.user_id)
        .bind(form.university_id)
        .bind(&images)
        .bind(releve)
        .fetch_one(db)
        .await
        .map_err(|e| map_write_error(e, "Document already exists"))?;

        track_document_generated(document_type.as_str());
        info!(
            document.id = %document.id,
            document_type = %document_type,
            images = document.images.len(),
            "Document created"
        );
        Ok(document)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "documents"))]
    pub async fn get_documents(db: &PgPool) -> Result<Vec<DocumentDetails>, AppError> {
        let documents = sqlx::query_as::<_, DocumentDetails>(&format!(
            "{} ORDER BY doc.created_at DESC",
            SELECT_DETAILS
        ))
        .fetch_all(db)
        .await?;

        debug!(count = documents.len(), "Documents fetched");
        Ok(documents)
    }

    #[instrument(skip(db), fields(document.id = %id, db.operation = "SELECT", db.table = "documents"))]
    pub async fn get_document(db: &PgPool, id: DocumentId) -> Result<DocumentDetails, AppError> {
        sqlx::query_as::<_, DocumentDetails>(&format!("{} WHERE doc.id = $1", SELECT_DETAILS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Document not found")))
    }
}

#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;
    use crate::utils::fixtures;
    use axum::http::StatusCode;
    use unidocs_models::AccountType;

    struct Graduate {
        user: UserId,
        university: UniversityId,
    }

    /// A student of L2 graded in two of the three L2 courses, plus a grade
    /// from a previous year that must not appear.
    async fn graduate(pool: &PgPool) -> Graduate {
        let campus = fixtures::campus(pool).await;
        let prof = fixtures::user(pool, "prof@unikin.cd", AccountType::Professor).await;
        let professor = fixtures::professor(pool, prof, campus.university).await;
        let user = fixtures::user(pool, "eleve@unikin.cd", AccountType::Student).await;
        let student = fixtures::student(pool, user, &campus).await;

        let old_year = fixtures::academic_year(pool, campus.university, "2023-2024").await;
        sqlx::query("UPDATE academic_years SET status = 'inactive' WHERE id = $1")
            .bind(old_year)
            .execute(pool)
            .await
            .unwrap();
        let year = fixtures::academic_year(pool, campus.university, "2024-2025").await;

        let physique = fixtures::course(pool, campus.classroom, professor, "Physique", 3).await;
        let algebre = fixtures::course(pool, campus.classroom, professor, "Algebre", 4).await;
        fixtures::course(pool, campus.classroom, professor, "Chimie", 2).await;

        for (course, academic_year, rating) in [
            (physique, year, 12.0),
            (algebre, year, 15.5),
            (physique, old_year, 8.0),
        ] {
            sqlx::query(
                "INSERT INTO cotations (total, rating, course_id, student_id, academic_year_id)
                 VALUES (20, $1, $2, $3, $4)",
            )
            .bind(rating)
            .bind(course)
            .bind(student)
            .bind(academic_year)
            .execute(pool)
            .await
            .unwrap();
        }

        Graduate {
            user,
            university: campus.university,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_build_releve_for_active_year(pool: PgPool) {
        let graduate = graduate(&pool).await;

        let releve = DocumentService::build_releve(&pool, graduate.user, graduate.university)
            .await
            .unwrap();

        assert_eq!(releve.student.user_id, graduate.user);
        assert_eq!(releve.student.email, "eleve@unikin.cd");
        assert_eq!(releve.university.name, "UNIKIN");
        assert_eq!(releve.academic_year.name, "2024-2025");
        assert_eq!(releve.faculty.name, "Sciences");
        assert_eq!(releve.classroom.name, "L2");

        let courses: Vec<_> = releve
            .courses
            .iter()
            .map(|c| (c.course_name.as_str(), c.student_rating))
            .collect();
        assert_eq!(courses, vec![("Algebre", 15.5), ("Physique", 12.0)]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_releve_requires_student_record(pool: PgPool) {
        let campus = fixtures::campus(&pool).await;
        fixtures::academic_year(&pool, campus.university, "2024-2025").await;

        let err = DocumentService::build_releve(&pool, campus.owner, campus.university)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_releve_requires_active_year(pool: PgPool) {
        let campus = fixtures::campus(&pool).await;
        let user = fixtures::user(&pool, "eleve@unikin.cd", AccountType::Student).await;
        fixtures::student(&pool, user, &campus).await;

        let err = DocumentService::build_releve(&pool, user, campus.university)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.error.to_string().contains("academic year"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_releve_document(pool: PgPool) {
        let graduate = graduate(&pool).await;
        let releve = DocumentService::build_releve(&pool, graduate.user, graduate.university)
            .await
            .unwrap();
        let form = DocumentForm {
            name: "Releve 2024-2025".to_string(),
            document_type: "Releve de cotes".to_string(),
            user_id: graduate.user,
            university_id: graduate.university,
        };

        let document =
            DocumentService::create_document(&pool, &form, DocumentContent::Releve(releve.clone()))
                .await
                .unwrap();
        assert_eq!(document.document_type, DocumentType::ReleveDeCotes);
        assert!(document.images.is_empty());

        let details = DocumentService::get_document(&pool, document.id).await.unwrap();
        assert_eq!(details.releve.map(|r| r.0), Some(releve));
        assert_eq!(details.user.0.id, graduate.user);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_image_document(pool: PgPool) {
        let campus = fixtures::campus(&pool).await;
        let form = DocumentForm {
            name: "Diplome".to_string(),
            document_type: "Image".to_string(),
            user_id: campus.owner,
            university_id: campus.university,
        };
        let urls = vec![
            "http://localhost:3000/files/documents/a-scan.png".to_string(),
            "http://localhost:3000/files/documents/b-scan.png".to_string(),
        ];

        let document =
            DocumentService::create_document(&pool, &form, DocumentContent::Images(urls.clone()))
                .await
                .unwrap();
        assert_eq!(document.images, urls);
        assert!(document.releve.is_none());
    }
}
