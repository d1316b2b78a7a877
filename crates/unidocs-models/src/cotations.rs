//! Grades. One cotation per (student, course, academic year).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::{AcademicYearSummary, CourseSummary, StudentSummary};
use crate::ids::{AcademicYearId, CotationId, CourseId, StudentId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cotation {
    pub id: CotationId,
    pub total: i32,
    pub rating: f64,
    pub course_id: CourseId,
    pub student_id: StudentId,
    pub academic_year_id: AcademicYearId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CotationDetails {
    pub id: CotationId,
    pub total: i32,
    pub rating: f64,
    #[schema(value_type = CourseSummary)]
    pub course: Json<CourseSummary>,
    #[schema(value_type = AcademicYearSummary)]
    pub academic_year: Json<AcademicYearSummary>,
    #[schema(value_type = StudentSummary)]
    pub student: Json<StudentSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCotationDto {
    #[validate(range(min = 0, message = "total must be a positive integer"))]
    pub total: i32,
    #[validate(range(min = 0.0, message = "rating must be a positive number"))]
    pub rating: f64,
    pub course_id: CourseId,
    pub student_id: StudentId,
    pub academic_year_id: AcademicYearId,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCotationDto {
    #[validate(range(min = 0, message = "total must be a positive integer"))]
    pub total: i32,
    #[validate(range(min = 0.0, message = "rating must be a positive number"))]
    pub rating: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedCotation {
    pub message: String,
    pub cotation: Cotation,
}
