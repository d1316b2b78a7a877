//! Translation of constraint violations into client errors.

use tracing::{error, warn};
use unidocs_core::AppError;

/// Maps a failed INSERT/UPDATE to an [`AppError`].
///
/// - unique violation: 400 with `unique_message`
/// - foreign key violation: 422, the referenced record does not exist
/// - check violation: 422
/// - anything else: 500
pub fn map_write_error(e: sqlx::Error, unique_message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            warn!(constraint = ?db_err.constraint(), "Unique constraint violated");
            return AppError::bad_request(anyhow::anyhow!("{}", unique_message));
        }
        if db_err.is_foreign_key_violation() {
            warn!(constraint = ?db_err.constraint(), "Foreign key constraint violated");
            return AppError::unprocessable(anyhow::anyhow!(
                "A referenced record does not exist"
            ));
        }
        if db_err.is_check_violation() {
            warn!(constraint = ?db_err.constraint(), "Check constraint violated");
            return AppError::unprocessable(anyhow::anyhow!("A field has an invalid value"));
        }
    }

    error!(error = %e, "Database error during write");
    AppError::database(e)
}
