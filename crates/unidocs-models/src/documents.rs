//! Documents and the "Releve de cotes" transcript.
//!
//! A document is either a set of uploaded images or a transcript generated
//! from the grades of a student for the active academic year of a university.
//! The transcript is denormalized on purpose: it is stored as JSONB and keeps
//! the values it had when it was generated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::{
    AcademicYearSummary, ClassroomSummary, FacultySummary, UniversitySummary, UserSummary,
};
use crate::enums::{DocumentType, RecordStatus};
use crate::ids::{DocumentId, StudentId, UniversityId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    pub document_type: DocumentType,
    pub user_id: UserId,
    pub university_id: UniversityId,
    pub images: Vec<String>,
    #[schema(value_type = Option<Releve>)]
    pub releve: Option<Json<Releve>>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDetails {
    pub id: DocumentId,
    pub name: String,
    pub document_type: DocumentType,
    pub images: Vec<String>,
    #[schema(value_type = Option<Releve>)]
    pub releve: Option<Json<Releve>>,
    pub status: RecordStatus,
    #[schema(value_type = UserSummary)]
    pub user: Json<UserSummary>,
    #[schema(value_type = UniversitySummary)]
    pub university: Json<UniversitySummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Text fields of the multipart create form. `document_type` stays a string
/// so an unknown value gets the dedicated error message instead of a generic
/// parse failure.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "documentType is required"))]
    pub document_type: String,
    pub user_id: UserId,
    pub university_id: UniversityId,
}

/// OpenAPI shape of the multipart body.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct DocumentMultipart {
    pub name: String,
    /// `Image` or `Releve de cotes`.
    pub document_type: String,
    pub user_id: UserId,
    pub university_id: UniversityId,
    /// Repeatable file field for `Image` documents, 3 MB per file at most.
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedDocument {
    pub message: String,
    pub document: Document,
}

/// Profile of the graded student as printed on the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReleveStudent {
    #[serde(rename = "uid")]
    pub user_id: UserId,
    pub student_id: StudentId,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub sexe: Option<String>,
    pub age: Option<i32>,
    pub telephone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReleveUniversity {
    pub id: UniversityId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReleveCourse {
    pub course_name: String,
    pub course_ponderation: i32,
    pub student_rating: f64,
    pub total: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Releve {
    pub id: Uuid,
    pub student: ReleveStudent,
    pub university: ReleveUniversity,
    pub academic_year: AcademicYearSummary,
    pub faculty: FacultySummary,
    pub classroom: ClassroomSummary,
    pub courses: Vec<ReleveCourse>,
}

impl Releve {
    /// Builds a transcript with a fresh id. Courses are ordered by name.
    pub fn assemble(
        student: ReleveStudent,
        university: ReleveUniversity,
        academic_year: AcademicYearSummary,
        faculty: FacultySummary,
        classroom: ClassroomSummary,
        mut courses: Vec<ReleveCourse>,
    ) -> Self {
        courses.sort_by(|a, b| a.course_name.cmp(&b.course_name));

        Self {
            id: Uuid::new_v4(),
            student,
            university,
            academic_year,
            faculty,
            classroom,
            courses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{AcademicYearId, ClassroomId, FacultyId};

    fn student() -> ReleveStudent {
        ReleveStudent {
            user_id: UserId::new(),
            student_id: StudentId::new(),
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            name: Some("Doe".to_string()),
            first_name: Some("John".to_string()),
            sexe: Some("male".to_string()),
            age: Some(22),
            telephone: Some("0812345678".to_string()),
            address: None,
        }
    }

    fn university() -> ReleveUniversity {
        ReleveUniversity {
            id: UniversityId::new(),
            name: "UNIKIN".to_string(),
            description: String::new(),
            address: "Mont Amba".to_string(),
            logo: None,
        }
    }

    fn course(name: &str, ponderation: i32, rating: f64) -> ReleveCourse {
        ReleveCourse {
            course_name: name.to_string(),
            course_ponderation: ponderation,
            student_rating: rating,
            total: 20,
        }
    }

    fn assemble(courses: Vec<ReleveCourse>) -> Releve {
        Releve::assemble(
            student(),
            university(),
            AcademicYearSummary {
                id: AcademicYearId::new(),
                name: "2024-2025".to_string(),
                status: RecordStatus::Active,
            },
            FacultySummary {
                id: FacultyId::new(),
                name: "Sciences".to_string(),
                description: String::new(),
            },
            ClassroomSummary {
                id: ClassroomId::new(),
                name: "L1 Informatique".to_string(),
            },
            courses,
        )
    }

    #[test]
    fn test_assemble_orders_courses_by_name() {
        let releve = assemble(vec![
            course("Physique", 4, 12.0),
            course("Algebre", 6, 15.5),
            course("Informatique", 5, 17.0),
        ]);

        let names: Vec<&str> = releve
            .courses
            .iter()
            .map(|c| c.course_name.as_str())
            .collect();
        assert_eq!(names, vec!["Algebre", "Informatique", "Physique"]);
        assert_eq!(releve.courses[0].course_ponderation, 6);
    }

    #[test]
    fn test_assemble_gives_each_transcript_its_own_id() {
        let a = assemble(vec![]);
        let b = assemble(vec![]);
        assert_ne!(a.id, b.id);
        assert!(a.courses.is_empty());
    }

    #[test]
    fn test_releve_json_shape() {
        let releve = assemble(vec![course("Algebre", 6, 15.5)]);
        let json = serde_json::to_value(&releve).unwrap();

        assert_eq!(json["academicYear"]["name"], "2024-2025");
        assert_eq!(json["student"]["firstName"], "John");
        assert!(json["student"]["uid"].is_string());
        assert!(json["student"]["studentId"].is_string());
        assert_eq!(json["courses"][0]["courseName"], "Algebre");
        assert_eq!(json["courses"][0]["studentRating"], 15.5);
        assert_eq!(json["courses"][0]["coursePonderation"], 6);

        let back: Releve = serde_json::from_value(json).unwrap();
        assert_eq!(back, releve);
    }

    #[test]
    fn test_document_form_field_names() {
        let body = serde_json::json!({
            "name": "Releve L1",
            "documentType": "Releve de cotes",
            "userId": UserId::new(),
            "universityId": UniversityId::new()
        });
        let form: DocumentForm = serde_json::from_value(body).unwrap();
        assert!(form.validate().is_ok());
        assert_eq!(
            form.document_type.parse::<DocumentType>().unwrap(),
            DocumentType::ReleveDeCotes
        );
    }
}
