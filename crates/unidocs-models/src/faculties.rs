use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::UniversitySummary;
use crate::enums::RecordStatus;
use crate::ids::{FacultyId, UniversityId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub id: FacultyId,
    pub name: String,
    pub description: String,
    pub university_id: UniversityId,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacultyDetails {
    pub id: FacultyId,
    pub name: String,
    pub description: String,
    pub status: RecordStatus,
    #[schema(value_type = UniversitySummary)]
    pub university: Json<UniversitySummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacultyDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub university_id: UniversityId,
    pub description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateFacultyDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedFaculty {
    pub message: String,
    pub faculty: Faculty,
}
