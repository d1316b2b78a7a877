//! User seeding: owners, professors and students with their role records.

use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use unidocs_models::AccountType;
use unidocs_models::ids::{ProfessorId, UniversityId, UserId};

use super::SeedResult;
use super::models::{Placement, SEED_EMAIL_DOMAIN, UserSeed};
use super::values_placeholders;

/// One owner account per university to create.
pub fn generate_owners(count: usize, password_hash: &str) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| generate_user(AccountType::Owner, idx, 0, password_hash))
        .collect()
}

pub fn generate_professors(
    university_count: usize,
    per_university: usize,
    password_hash: &str,
) -> Vec<UserSeed> {
    (0..university_count)
        .into_par_iter()
        .flat_map(|university_idx| {
            (0..per_university)
                .map(|idx| generate_user(AccountType::Professor, university_idx, idx, password_hash))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Students for every classroom, in placement order.
pub fn generate_students(
    placements: &[Placement],
    per_classroom: usize,
    password_hash: &str,
) -> Vec<UserSeed> {
    placements
        .par_iter()
        .enumerate()
        .flat_map(|(classroom_idx, _)| {
            (0..per_classroom)
                .map(|idx| generate_user(AccountType::Student, classroom_idx, idx, password_hash))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn generate_user(
    account_type: AccountType,
    group_idx: usize,
    user_idx: usize,
    password_hash: &str,
) -> UserSeed {
    let first_name: String = FirstName().fake();
    let name: String = LastName().fake();

    let local_part: String = format!(
        "{}.{}+{}{}",
        first_name.to_lowercase(),
        name.to_lowercase(),
        account_type.as_str(),
        group_idx * 100_000 + user_idx
    )
    .chars()
    .filter(|c| !c.is_whitespace() && *c != '\'')
    .collect();

    UserSeed {
        username: local_part.clone(),
        email: format!("{}@{}", local_part, SEED_EMAIL_DOMAIN),
        password_hash: password_hash.to_string(),
        account_type,
        name,
        first_name,
    }
}

pub async fn insert_users_batch(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> SeedResult<Vec<UserId>> {
    // 6 params per user
    const BATCH_SIZE: usize = 1000;
    let mut all_ids = Vec::with_capacity(users.len());

    for chunk in users.chunks(BATCH_SIZE) {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, account_type, name, first_name) VALUES {} RETURNING id",
            values_placeholders(chunk.len(), 6)
        );

        let mut q = sqlx::query_scalar::<_, UserId>(&query);
        for user in chunk {
            q = q
                .bind(&user.username)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(user.account_type)
                .bind(&user.name)
                .bind(&user.first_name);
        }

        all_ids.extend(q.fetch_all(&mut **tx).await?);
    }

    Ok(all_ids)
}

/// Inserts professor users and their professor records. Returns the
/// professor ids grouped by university, in the order of `university_ids`.
pub async fn seed_professors(
    tx: &mut Transaction<'_, Postgres>,
    university_ids: &[UniversityId],
    per_university: usize,
    password_hash: &str,
) -> SeedResult<Vec<Vec<ProfessorId>>> {
    let start_time = Instant::now();
    println!(
        "👩‍🏫 Seeding {} professors ({} per university)...",
        university_ids.len() * per_university,
        per_university
    );

    let users = generate_professors(university_ids.len(), per_university, password_hash);
    let user_ids = insert_users_batch(tx, &users).await?;

    let rows: Vec<(UserId, UniversityId)> = user_ids
        .iter()
        .enumerate()
        .map(|(idx, &user_id)| (user_id, university_ids[idx / per_university.max(1)]))
        .collect();

    let mut professor_ids = Vec::with_capacity(rows.len());
    for chunk in rows.chunks(2000) {
        let query = format!(
            "INSERT INTO professors (user_id, university_id) VALUES {} RETURNING id",
            values_placeholders(chunk.len(), 2)
        );
        let mut q = sqlx::query_scalar::<_, ProfessorId>(&query);
        for (user_id, university_id) in chunk {
            q = q.bind(user_id).bind(university_id);
        }
        professor_ids.extend(q.fetch_all(&mut **tx).await?);
    }

    println!(
        "   ✓ Inserted {} professors in {:?}",
        professor_ids.len(),
        start_time.elapsed()
    );

    Ok(professor_ids
        .chunks(per_university.max(1))
        .map(<[ProfessorId]>::to_vec)
        .collect())
}

pub async fn seed_students(
    tx: &mut Transaction<'_, Postgres>,
    placements: &[Placement],
    per_classroom: usize,
    password_hash: &str,
) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!(
        "🎓 Seeding {} students ({} per classroom)...",
        placements.len() * per_classroom,
        per_classroom
    );

    let users = generate_students(placements, per_classroom, password_hash);
    let user_ids = insert_users_batch(tx, &users).await?;

    let rows: Vec<(UserId, Placement)> = user_ids
        .iter()
        .enumerate()
        .map(|(idx, &user_id)| (user_id, placements[idx / per_classroom.max(1)]))
        .collect();

    let mut inserted = 0;
    // 5 params per student
    for chunk in rows.chunks(1000) {
        let query = format!(
            "INSERT INTO students (user_id, university_id, faculty_id, department_id, classroom_id) VALUES {}",
            values_placeholders(chunk.len(), 5)
        );
        let mut q = sqlx::query(&query);
        for (user_id, placement) in chunk {
            q = q
                .bind(user_id)
                .bind(placement.university)
                .bind(placement.faculty)
                .bind(placement.department)
                .bind(placement.classroom);
        }
        inserted += q.execute(&mut **tx).await?.rows_affected();
    }

    println!(
        "   ✓ Inserted {} students in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

/// Deletes every account on the seed domain.
pub async fn clear_users(db: &PgPool) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let pattern = format!("%@{}", SEED_EMAIL_DOMAIN);
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM documents WHERE user_id IN (SELECT id FROM users WHERE email LIKE $1)")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    tx.commit().await?;

    println!(
        "   ✓ Deleted {} users in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
