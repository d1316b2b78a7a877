use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::DepartmentSummary;
use crate::enums::RecordStatus;
use crate::ids::{ClassroomId, DepartmentId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: ClassroomId,
    pub name: String,
    pub department_id: DepartmentId,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomDetails {
    pub id: ClassroomId,
    pub name: String,
    pub status: RecordStatus,
    #[schema(value_type = DepartmentSummary)]
    pub department: Json<DepartmentSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassroomDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub department_id: DepartmentId,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateClassroomDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedClassroom {
    pub message: String,
    pub classroom: Classroom,
}
