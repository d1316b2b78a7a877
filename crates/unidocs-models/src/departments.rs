use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::FacultySummary;
use crate::enums::RecordStatus;
use crate::ids::{DepartmentId, FacultyId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub description: String,
    pub faculty_id: FacultyId,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentDetails {
    pub id: DepartmentId,
    pub name: String,
    pub description: String,
    pub status: RecordStatus,
    #[schema(value_type = FacultySummary)]
    pub faculty: Json<FacultySummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub faculty_id: FacultyId,
    pub description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartmentDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedDepartment {
    pub message: String,
    pub department: Department,
}
