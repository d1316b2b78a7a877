//! # unidocs core
//!
//! Foundational types shared by every unidocs crate:
//!
//! - [`errors`]: the application error type and its HTTP rendering
//! - [`pagination`]: the page/limit list envelope used by every list endpoint
//! - [`password`]: bcrypt hashing for signup and the CLI
//! - [`file_storage`]: storage backends for uploaded logos and document images
//! - [`serde`]: query-string deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use unidocs_core::{AppError, paginate};
//!
//! let page = paginate(vec![1, 2, 3], 1, 2);
//! assert_eq!(page.current_items, vec![1, 2]);
//!
//! let error = AppError::not_found(anyhow::anyhow!("Faculty not found"));
//! ```

pub mod errors;
pub mod file_storage;
pub mod pagination;
pub mod password;
pub mod serde;

pub use errors::AppError;
pub use file_storage::{FileStorage, LocalFileStorage, StorageError};
pub use pagination::{DEFAULT_PAGE_LIMIT, Page, PaginationParams, paginate, paginate_with};
pub use password::{hash_password, verify_password};
