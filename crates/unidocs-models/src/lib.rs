//! # Unidocs Models
//!
//! Domain models and DTOs for the unidocs API: typed ids, Postgres enums,
//! rows returned by the services, request bodies with their validation rules
//! and response shapes.
//!
//! Joined views embed related records as small summaries. The services build
//! those with `json_build_object` in SQL and decode them through
//! [`sqlx::types::Json`], so a detail row maps onto its response without any
//! hand-written conversion.
//!
//! # Example
//!
//! ```ignore
//! use unidocs_models::faculties::{CreateFacultyDto, FacultyDetails};
//! use unidocs_models::ids::UniversityId;
//! ```

pub mod academic_years;
pub mod classrooms;
pub mod common;
pub mod cotations;
pub mod courses;
pub mod departments;
pub mod documents;
pub mod enums;
pub mod faculties;
pub mod ids;
pub mod professors;
pub mod students;
pub mod universities;
pub mod users;

pub use common::{
    AcademicYearSummary, ClassroomSummary, CourseSummary, DepartmentSummary, FacultySummary,
    MessageResponse, MutationResponse, ProfessorSummary, StudentSummary, UniversitySummary,
    UserSummary,
};
pub use enums::{AccountType, DocumentType, RecordStatus};
