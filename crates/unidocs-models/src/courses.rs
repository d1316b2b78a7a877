use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::{ClassroomSummary, ProfessorSummary};
use crate::enums::RecordStatus;
use crate::ids::{ClassroomId, CourseId, ProfessorId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub ponderation: i32,
    pub classroom_id: ClassroomId,
    pub professor_id: ProfessorId,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetails {
    pub id: CourseId,
    pub name: String,
    pub ponderation: i32,
    pub status: RecordStatus,
    #[schema(value_type = ClassroomSummary)]
    pub classroom: Json<ClassroomSummary>,
    #[schema(value_type = ProfessorSummary)]
    pub professor: Json<ProfessorSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for both create and update; every field is replaced on update.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "ponderation must be a positive integer"))]
    pub ponderation: i32,
    pub classroom_id: ClassroomId,
    pub professor_id: ProfessorId,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedCourse {
    pub message: String,
    pub course: Course,
}
