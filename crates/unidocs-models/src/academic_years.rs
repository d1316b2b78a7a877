//! Academic years. A university has at most one active year at a time; the
//! service enforces it and a partial unique index backs it up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::UniversitySummary;
use crate::enums::RecordStatus;
use crate::ids::{AcademicYearId, UniversityId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYear {
    pub id: AcademicYearId,
    pub name: String,
    pub university_id: UniversityId,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYearDetails {
    pub id: AcademicYearId,
    pub name: String,
    pub status: RecordStatus,
    #[schema(value_type = UniversitySummary)]
    pub university: Json<UniversitySummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAcademicYearDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub university_id: UniversityId,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAcademicYearDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAcademicYear {
    pub message: String,
    pub academic_year: AcademicYear,
}
