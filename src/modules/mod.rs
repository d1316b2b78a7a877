pub mod academic_years;
pub mod auth;
pub mod classrooms;
pub mod cotations;
pub mod courses;
pub mod departments;
pub mod documents;
pub mod faculties;
pub mod professors;
pub mod students;
pub mod universities;
pub mod users;
