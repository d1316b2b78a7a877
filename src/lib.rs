//! # Unidocs API
//!
//! REST backend for academic records: universities, faculties, departments,
//! classrooms, academic years, courses, professors, students, grades
//! ("cotations") and documents, including generated "Releve de cotes"
//! transcripts.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # bearer auth, account type guards, rate limiting
//! ├── modules/          # one folder per resource
//! │   └── <resource>/
//! │       ├── controller.rs   # HTTP handlers with OpenAPI annotations
//! │       ├── router.rs       # route table and guards
//! │       └── service.rs      # SQL and business rules
//! ├── utils/            # multipart forms, uploads, SQL error mapping
//! ├── docs.rs           # OpenAPI document
//! ├── router.rs         # application router
//! ├── state.rs          # shared state
//! └── validator.rs      # validated JSON body and query extractors
//! ```
//!
//! Models live in `unidocs-models`, errors and pagination in `unidocs-core`,
//! configuration in `unidocs-config`.
//!
//! ## Authentication
//!
//! Tokens are minted by an external identity provider and verified here with
//! the shared HS256 secret (`JWT_SECRET`). The subject is the user id. Guards
//! then load the user and compare its account type with the route's
//! requirement:
//!
//! | Guard | Account types |
//! |-------|---------------|
//! | `require_owner` | owner |
//! | `require_professor` | professor |
//! | `require_student` | student |
//! | `require_admin` | admin |
//! | `require_auth` | any |
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

pub use unidocs_auth;
pub use unidocs_config;
pub use unidocs_core;
pub use unidocs_db;
pub use unidocs_models;
