//! Activation and deactivation, shared by every table with a `status` column.

use sqlx::PgPool;
use tracing::{info, instrument};
use unidocs_core::AppError;
use unidocs_models::{AccountType, MutationResponse, RecordStatus};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTable {
    Universities,
    Faculties,
    Departments,
    Classrooms,
    AcademicYears,
    Courses,
    Professors,
    Students,
    Documents,
}

impl StatusTable {
    pub fn table(&self) -> &'static str {
        match self {
            StatusTable::Universities => "universities",
            StatusTable::Faculties => "faculties",
            StatusTable::Departments => "departments",
            StatusTable::Classrooms => "classrooms",
            StatusTable::AcademicYears => "academic_years",
            StatusTable::Courses => "courses",
            StatusTable::Professors => "professors",
            StatusTable::Students => "students",
            StatusTable::Documents => "documents",
        }
    }

    /// Name used in response and error messages.
    pub fn entity(&self) -> &'static str {
        match self {
            StatusTable::Universities => "University",
            StatusTable::Faculties => "Faculty",
            StatusTable::Departments => "Department",
            StatusTable::Classrooms => "Classroom",
            StatusTable::AcademicYears => "Academic year",
            StatusTable::Courses => "Course",
            StatusTable::Professors => "Professor",
            StatusTable::Students => "Student",
            StatusTable::Documents => "Document",
        }
    }

    fn update_sql(&self) -> String {
        format!(
            "UPDATE {} SET status = $1, updated_at = NOW() WHERE id = $2",
            self.table()
        )
    }
}

#[instrument(skip(db), fields(db.operation = "UPDATE", db.table = table.table()))]
pub async fn set_status(
    db: &PgPool,
    table: StatusTable,
    id: Uuid,
    status: RecordStatus,
) -> Result<(), AppError> {
    let result = sqlx::query(&table.update_sql())
        .bind(status)
        .bind(id)
        .execute(db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(anyhow::anyhow!(
            "{} not found",
            table.entity()
        )));
    }

    info!(record.id = %id, status = %status, "{} status changed", table.entity());
    Ok(())
}

/// Sets the status and builds the "X activated/deactivated successfully" reply.
pub async fn change_status(
    db: &PgPool,
    table: StatusTable,
    id: impl Into<Uuid>,
    status: RecordStatus,
    author: AccountType,
) -> Result<MutationResponse, AppError> {
    let id = id.into();
    set_status(db, table, id, status).await?;
    Ok(MutationResponse::status_changed(table.entity(), id, status, author))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_sql_targets_table() {
        assert_eq!(
            StatusTable::Classrooms.update_sql(),
            "UPDATE classrooms SET status = $1, updated_at = NOW() WHERE id = $2"
        );
        assert_eq!(StatusTable::Documents.entity(), "Document");
    }
}
