use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::{UniversitySummary, UserSummary};
use crate::enums::RecordStatus;
use crate::ids::{ProfessorId, UniversityId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Professor {
    pub id: ProfessorId,
    pub user_id: UserId,
    pub university_id: UniversityId,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorDetails {
    pub id: ProfessorId,
    pub status: RecordStatus,
    #[schema(value_type = UserSummary)]
    pub user: Json<UserSummary>,
    #[schema(value_type = UniversitySummary)]
    pub university: Json<UniversitySummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfessorDto {
    pub user_id: UserId,
    pub university_id: UniversityId,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfessorDto {
    pub university_id: UniversityId,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedProfessor {
    pub message: String,
    pub professor: Professor,
}
