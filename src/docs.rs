use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use unidocs_core::{PaginationParams, errors::ErrorResponse};
use unidocs_models::{
    AccountType, DocumentType, MessageResponse, MutationResponse, RecordStatus,
    documents::{Releve, ReleveCourse, ReleveStudent, ReleveUniversity},
    users::SignupResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::welcome,
        crate::modules::auth::controller::signup,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::universities::controller::create_university,
        crate::modules::universities::controller::update_university,
        crate::modules::universities::controller::get_universities,
        crate::modules::universities::controller::get_university,
        crate::modules::universities::controller::activate_university,
        crate::modules::universities::controller::deactivate_university,
        crate::modules::universities::controller::get_university_faculties,
        crate::modules::universities::controller::get_university_departments,
        crate::modules::universities::controller::get_university_classrooms,
        crate::modules::universities::controller::get_university_professors,
        crate::modules::universities::controller::get_university_students,
        crate::modules::faculties::controller::create_faculty,
        crate::modules::faculties::controller::update_faculty,
        crate::modules::faculties::controller::get_faculties,
        crate::modules::faculties::controller::get_faculty,
        crate::modules::faculties::controller::activate_faculty,
        crate::modules::faculties::controller::deactivate_faculty,
        crate::modules::departments::controller::create_department,
        crate::modules::departments::controller::update_department,
        crate::modules::departments::controller::get_departments,
        crate::modules::departments::controller::get_department,
        crate::modules::departments::controller::activate_department,
        crate::modules::departments::controller::deactivate_department,
        crate::modules::departments::controller::get_department_classrooms,
        crate::modules::classrooms::controller::create_classroom,
        crate::modules::classrooms::controller::update_classroom,
        crate::modules::classrooms::controller::get_classrooms,
        crate::modules::classrooms::controller::get_classroom,
        crate::modules::classrooms::controller::activate_classroom,
        crate::modules::classrooms::controller::deactivate_classroom,
        crate::modules::academic_years::controller::create_academic_year,
        crate::modules::academic_years::controller::update_academic_year,
        crate::modules::academic_years::controller::get_academic_years,
        crate::modules::academic_years::controller::get_academic_year,
        crate::modules::academic_years::controller::activate_academic_year,
        crate::modules::academic_years::controller::deactivate_academic_year,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::activate_course,
        crate::modules::courses::controller::deactivate_course,
        crate::modules::professors::controller::create_professor,
        crate::modules::professors::controller::update_professor,
        crate::modules::professors::controller::get_professors,
        crate::modules::professors::controller::get_professor,
        crate::modules::professors::controller::activate_professor,
        crate::modules::professors::controller::deactivate_professor,
        crate::modules::professors::controller::get_professor_courses,
        crate::modules::professors::controller::get_professor_classrooms,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::activate_student,
        crate::modules::students::controller::deactivate_student,
        crate::modules::cotations::controller::create_cotation,
        crate::modules::cotations::controller::update_cotation,
        crate::modules::cotations::controller::get_cotations,
        crate::modules::cotations::controller::get_cotation,
        crate::modules::documents::controller::create_document,
        crate::modules::documents::controller::get_documents,
        crate::modules::documents::controller::get_document,
        crate::modules::documents::controller::activate_document,
        crate::modules::documents::controller::deactivate_document,
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            MutationResponse,
            SignupResponse,
            PaginationParams,
            AccountType,
            RecordStatus,
            DocumentType,
            Releve,
            ReleveStudent,
            ReleveUniversity,
            ReleveCourse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Root", description = "Service status"),
        (name = "Auth", description = "Account creation"),
        (name = "Users", description = "User profiles"),
        (name = "Universities", description = "Universities and their sub-lists"),
        (name = "Faculties", description = "Faculties of a university"),
        (name = "Departments", description = "Departments of a faculty"),
        (name = "Classrooms", description = "Classrooms of a department"),
        (name = "Academic years", description = "Academic years, one active per university"),
        (name = "Courses", description = "Courses taught in a classroom"),
        (name = "Professors", description = "Professor enrolments"),
        (name = "Students", description = "Student enrolments"),
        (name = "Cotations", description = "Grades per student, course and academic year"),
        (name = "Documents", description = "Uploaded images and generated transcripts")
    ),
    info(
        title = "Unidocs API",
        version = "1.0.0",
        description = "University documents backend",
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
