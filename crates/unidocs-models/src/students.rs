use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::{
    ClassroomSummary, DepartmentSummary, FacultySummary, UniversitySummary, UserSummary,
};
use crate::enums::RecordStatus;
use crate::ids::{ClassroomId, DepartmentId, FacultyId, StudentId, UniversityId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub user_id: UserId,
    pub university_id: UniversityId,
    pub faculty_id: FacultyId,
    pub department_id: DepartmentId,
    pub classroom_id: ClassroomId,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Student enrolment with every reference resolved.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetails {
    pub id: StudentId,
    pub status: RecordStatus,
    #[schema(value_type = UserSummary)]
    pub user: Json<UserSummary>,
    #[schema(value_type = UniversitySummary)]
    pub university: Json<UniversitySummary>,
    #[schema(value_type = FacultySummary)]
    pub faculty: Json<FacultySummary>,
    #[schema(value_type = DepartmentSummary)]
    pub department: Json<DepartmentSummary>,
    #[schema(value_type = ClassroomSummary)]
    pub classroom: Json<ClassroomSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    pub user_id: UserId,
    pub university_id: UniversityId,
    pub faculty_id: FacultyId,
    pub department_id: DepartmentId,
    pub classroom_id: ClassroomId,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentDto {
    pub university_id: UniversityId,
    pub faculty_id: FacultyId,
    pub department_id: DepartmentId,
    pub classroom_id: ClassroomId,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedStudent {
    pub message: String,
    pub student: Student,
}
