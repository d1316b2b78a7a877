//! Response envelopes and the summaries embedded in joined views.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::enums::{AccountType, RecordStatus};
use crate::ids::{
    AcademicYearId, ClassroomId, CourseId, DepartmentId, FacultyId, ProfessorId, StudentId,
    UniversityId, UserId,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Returned by update, activate and deactivate handlers.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MutationResponse {
    pub message: String,
    pub id: Uuid,
    /// Account type of the caller that performed the change.
    pub author: AccountType,
}

impl MutationResponse {
    pub fn new(message: impl Into<String>, id: impl Into<Uuid>, author: AccountType) -> Self {
        Self {
            message: message.into(),
            id: id.into(),
            author,
        }
    }

    pub fn status_changed(
        entity: &str,
        id: impl Into<Uuid>,
        status: RecordStatus,
        author: AccountType,
    ) -> Self {
        let verb = match status {
            RecordStatus::Active => "activated",
            RecordStatus::Inactive => "deactivated",
        };
        Self::new(format!("{} {} successfully", entity, verb), id, author)
    }
}

// Summaries are decoded from `json_build_object` columns, so their camelCase
// keys must match the keys the SQL builds. As rows they read snake_case columns.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UniversitySummary {
    pub id: UniversityId,
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacultySummary {
    pub id: FacultyId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub id: DepartmentId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomSummary {
    pub id: ClassroomId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYearSummary {
    pub id: AcademicYearId,
    pub name: String,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: CourseId,
    pub name: String,
    pub ponderation: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorSummary {
    pub id: ProfessorId,
    pub user_id: UserId,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: StudentId,
    pub user_id: UserId,
    pub username: String,
}
