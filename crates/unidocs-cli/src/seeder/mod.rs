//! Fake data seeding for universities and their people.
//!
//! Rows are generated in parallel with rayon and written with multi-value
//! `INSERT` statements inside a single transaction.

pub mod models;
pub mod universities;
pub mod users;

use sqlx::PgPool;
use std::time::Instant;

pub use models::{People, SEED_EMAIL_DOMAIN, SeedConfig, Structure};

pub type SeedResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Password given to every seeded account.
pub const SEED_PASSWORD: &str = "password123";

/// Builds `($1, $2), ($3, $4), ...` for `rows` tuples of `columns` params.
pub fn values_placeholders(rows: usize, columns: usize) -> String {
    (0..rows)
        .map(|row| {
            let params: Vec<String> = (1..=columns)
                .map(|col| format!("${}", row * columns + col))
                .collect();
            format!("({})", params.join(", "))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Default)]
pub struct SeedSummary {
    pub universities: usize,
    pub classrooms: usize,
    pub professors: usize,
    pub courses: u64,
    pub students: u64,
}

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> SeedResult<SeedSummary> {
    let start_time = Instant::now();
    println!("🌱 Seeding database...\n");

    let password_hash = unidocs_core::hash_password(SEED_PASSWORD)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let mut tx = db.begin().await?;

    let owners = users::generate_owners(config.num_universities, &password_hash);
    let owner_ids = users::insert_users_batch(&mut tx, &owners).await?;

    let university_ids = universities::seed_universities(&mut tx, &owner_ids).await?;
    let placements = universities::seed_structure(&mut tx, &university_ids, &config.structure).await?;

    let professors = users::seed_professors(
        &mut tx,
        &university_ids,
        config.people.professors_per_university,
        &password_hash,
    )
    .await?;

    let courses = universities::seed_courses(
        &mut tx,
        &placements,
        &university_ids,
        &professors,
        config.people.courses_per_classroom,
    )
    .await?;

    let students = users::seed_students(
        &mut tx,
        &placements,
        config.people.students_per_classroom,
        &password_hash,
    )
    .await?;

    tx.commit().await?;

    let summary = SeedSummary {
        universities: university_ids.len(),
        classrooms: placements.len(),
        professors: professors.iter().map(Vec::len).sum(),
        courses,
        students,
    };

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    println!("   Universities: {}", summary.universities);
    println!("   Classrooms:   {}", summary.classrooms);
    println!("   Professors:   {}", summary.professors);
    println!("   Courses:      {}", summary.courses);
    println!("   Students:     {}", summary.students);
    println!("   Password for all seeded accounts: {}", SEED_PASSWORD);

    Ok(summary)
}

/// Removes seeded universities and every account on the seed domain.
pub async fn clear_all(db: &PgPool) -> SeedResult<()> {
    let start_time = Instant::now();
    println!("🧹 Clearing seeded data...\n");

    let pattern = format!("%@{}", SEED_EMAIL_DOMAIN);
    universities::clear_universities(db, &pattern).await?;
    users::clear_users(db).await?;

    println!("\n✅ Cleared seeded data in {:?}", start_time.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_placeholders() {
        assert_eq!(values_placeholders(2, 3), "($1, $2, $3), ($4, $5, $6)");
        assert_eq!(values_placeholders(1, 1), "($1)");
        assert_eq!(values_placeholders(0, 4), "");
    }
}
