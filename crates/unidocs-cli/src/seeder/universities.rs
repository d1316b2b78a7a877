//! University tree seeding: universities, academic years, faculties,
//! departments, classrooms and courses.

use fake::Fake;
use fake::faker::address::en::*;
use fake::faker::lorem::en::Sentence;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use unidocs_models::ids::{
    ClassroomId, DepartmentId, FacultyId, ProfessorId, UniversityId, UserId,
};

use super::SeedResult;
use super::models::{ChildSeed, Placement, Structure, UniversitySeed};
use super::values_placeholders;

/// Name of the active academic year given to every seeded university.
const SEED_ACADEMIC_YEAR: &str = "2025-2026";

const FACULTY_NAMES: &[&str] = &[
    "Sciences",
    "Lettres",
    "Droit",
    "Medecine",
    "Economie",
    "Polytechnique",
    "Psychologie",
    "Agronomie",
];

const COURSE_NAMES: &[&str] = &[
    "Algebre",
    "Analyse",
    "Physique",
    "Chimie",
    "Statistiques",
    "Informatique",
    "Anglais",
    "Philosophie",
    "Histoire",
    "Biologie",
];

pub fn generate_universities(owners: &[UserId]) -> Vec<UniversitySeed> {
    owners
        .par_iter()
        .map(|&owner| {
            let city: String = CityName().fake();
            let street: String = StreetName().fake();
            let building: String = BuildingNumber().fake();
            let description: String = Sentence(6..12).fake();

            UniversitySeed {
                name: format!("Universite de {}", city),
                description,
                address: format!("{} {}, {}", building, street, city),
                owner,
            }
        })
        .collect()
}

pub fn generate_faculties(
    university_ids: &[UniversityId],
    per_university: usize,
) -> Vec<ChildSeed<UniversityId>> {
    university_ids
        .par_iter()
        .flat_map(|&university| {
            (0..per_university)
                .map(|idx| ChildSeed {
                    name: numbered(FACULTY_NAMES, idx),
                    parent: university,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn generate_departments(
    faculty_ids: &[FacultyId],
    per_faculty: usize,
) -> Vec<ChildSeed<FacultyId>> {
    faculty_ids
        .par_iter()
        .flat_map(|&faculty| {
            (0..per_faculty)
                .map(|idx| ChildSeed {
                    name: format!("Departement {}", idx + 1),
                    parent: faculty,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn generate_classrooms(
    department_ids: &[DepartmentId],
    per_department: usize,
) -> Vec<ChildSeed<DepartmentId>> {
    department_ids
        .par_iter()
        .flat_map(|&department| {
            (0..per_department)
                .map(|idx| ChildSeed {
                    name: classroom_name(idx),
                    parent: department,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// L1, L2, L3 then M1, M2, then numbered levels.
fn classroom_name(idx: usize) -> String {
    match idx {
        0..=2 => format!("L{}", idx + 1),
        3..=4 => format!("M{}", idx - 2),
        _ => format!("Niveau {}", idx + 1),
    }
}

/// Picks from `names`, suffixing a counter once the list runs out.
fn numbered(names: &[&str], idx: usize) -> String {
    let base = names[idx % names.len()];
    match idx / names.len() {
        0 => base.to_string(),
        round => format!("{} {}", base, round + 1),
    }
}

/// Seeds the universities with one active academic year each.
pub async fn seed_universities(
    tx: &mut Transaction<'_, Postgres>,
    owners: &[UserId],
) -> SeedResult<Vec<UniversityId>> {
    let start_time = Instant::now();
    println!("🏛️  Seeding {} universities...", owners.len());

    let universities = generate_universities(owners);
    let mut ids = Vec::with_capacity(universities.len());

    for chunk in universities.chunks(1000) {
        let query = format!(
            "INSERT INTO universities (name, description, address, user_id) VALUES {} RETURNING id",
            values_placeholders(chunk.len(), 4)
        );
        let mut q = sqlx::query_scalar::<_, UniversityId>(&query);
        for university in chunk {
            q = q
                .bind(&university.name)
                .bind(&university.description)
                .bind(&university.address)
                .bind(university.owner);
        }
        ids.extend(q.fetch_all(&mut **tx).await?);
    }

    for chunk in ids.chunks(2000) {
        let query = format!(
            "INSERT INTO academic_years (name, university_id) VALUES {}",
            values_placeholders(chunk.len(), 2)
        );
        let mut q = sqlx::query(&query);
        for university_id in chunk {
            q = q.bind(SEED_ACADEMIC_YEAR).bind(university_id);
        }
        q.execute(&mut **tx).await?;
    }

    println!(
        "   ✓ Inserted {} universities in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

async fn insert_children<P, Id>(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    parent_column: &str,
    rows: &[ChildSeed<P>],
) -> SeedResult<Vec<Id>>
where
    P: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + Copy + Send + Sync,
    Id: for<'r> sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres> + Send + Unpin,
{
    let mut ids = Vec::with_capacity(rows.len());

    for chunk in rows.chunks(2000) {
        let query = format!(
            "INSERT INTO {} (name, {}) VALUES {} RETURNING id",
            table,
            parent_column,
            values_placeholders(chunk.len(), 2)
        );
        let mut q = sqlx::query_scalar::<_, Id>(&query);
        for row in chunk {
            q = q.bind(&row.name).bind(row.parent);
        }
        ids.extend(q.fetch_all(&mut **tx).await?);
    }

    Ok(ids)
}

/// Seeds faculties, departments and classrooms below each university and
/// returns one placement per classroom.
pub async fn seed_structure(
    tx: &mut Transaction<'_, Postgres>,
    university_ids: &[UniversityId],
    structure: &Structure,
) -> SeedResult<Vec<Placement>> {
    let start_time = Instant::now();
    println!(
        "🏫 Seeding {} faculties, {} departments per faculty, {} classrooms per department...",
        university_ids.len() * structure.faculties,
        structure.departments_per_faculty,
        structure.classrooms_per_department
    );

    let faculties = generate_faculties(university_ids, structure.faculties);
    let faculty_ids: Vec<FacultyId> =
        insert_children(tx, "faculties", "university_id", &faculties).await?;

    let departments = generate_departments(&faculty_ids, structure.departments_per_faculty);
    let department_ids: Vec<DepartmentId> =
        insert_children(tx, "departments", "faculty_id", &departments).await?;

    let classrooms = generate_classrooms(&department_ids, structure.classrooms_per_department);
    let classroom_ids: Vec<ClassroomId> =
        insert_children(tx, "classrooms", "department_id", &classrooms).await?;

    // Rows come back in generation order, so parents are found by index.
    let placements: Vec<Placement> = classroom_ids
        .iter()
        .enumerate()
        .map(|(idx, &classroom)| {
            let department_idx = idx / structure.classrooms_per_department;
            let faculty_idx = department_idx / structure.departments_per_faculty;

            Placement {
                university: faculties[faculty_idx].parent,
                faculty: faculty_ids[faculty_idx],
                department: department_ids[department_idx],
                classroom,
            }
        })
        .collect();

    println!(
        "   ✓ Inserted {} classrooms in {:?}",
        placements.len(),
        start_time.elapsed()
    );

    Ok(placements)
}

/// Gives every classroom `per_classroom` courses, handed out round-robin to
/// the professors of its university.
pub async fn seed_courses(
    tx: &mut Transaction<'_, Postgres>,
    placements: &[Placement],
    university_ids: &[UniversityId],
    professors: &[Vec<ProfessorId>],
    per_classroom: usize,
) -> SeedResult<u64> {
    let start_time = Instant::now();

    let rows: Vec<(String, i32, ClassroomId, ProfessorId)> = placements
        .iter()
        .filter_map(|placement| {
            let university_idx = university_ids
                .iter()
                .position(|&id| id == placement.university)?;
            let staff = professors.get(university_idx).filter(|p| !p.is_empty())?;
            Some((placement, staff))
        })
        .flat_map(|(placement, staff)| {
            (0..per_classroom).map(move |idx| {
                (
                    numbered(COURSE_NAMES, idx),
                    (2..=6).fake::<i32>(),
                    placement.classroom,
                    staff[idx % staff.len()],
                )
            })
        })
        .collect();

    println!("📘 Seeding {} courses...", rows.len());

    let mut inserted = 0;
    for chunk in rows.chunks(1000) {
        let query = format!(
            "INSERT INTO courses (name, ponderation, classroom_id, professor_id) VALUES {}",
            values_placeholders(chunk.len(), 4)
        );
        let mut q = sqlx::query(&query);
        for (name, ponderation, classroom, professor) in chunk {
            q = q
                .bind(name)
                .bind(ponderation)
                .bind(classroom)
                .bind(professor);
        }
        inserted += q.execute(&mut **tx).await?.rows_affected();
    }

    println!(
        "   ✓ Inserted {} courses in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

/// Deletes everything hanging off universities owned by seeded accounts.
pub async fn clear_universities(db: &PgPool, email_pattern: &str) -> SeedResult<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded universities...");

    const SEEDED: &str = "SELECT un.id FROM universities un JOIN users o ON o.id = un.user_id WHERE o.email LIKE $1";

    let statements = [
        format!("DELETE FROM cotations WHERE academic_year_id IN (SELECT id FROM academic_years WHERE university_id IN ({SEEDED}))"),
        format!("DELETE FROM documents WHERE university_id IN ({SEEDED})"),
        format!("DELETE FROM students WHERE university_id IN ({SEEDED})"),
        format!("DELETE FROM courses WHERE professor_id IN (SELECT id FROM professors WHERE university_id IN ({SEEDED}))"),
        format!("DELETE FROM professors WHERE university_id IN ({SEEDED})"),
        format!("DELETE FROM classrooms WHERE department_id IN (SELECT d.id FROM departments d JOIN faculties f ON f.id = d.faculty_id WHERE f.university_id IN ({SEEDED}))"),
        format!("DELETE FROM departments WHERE faculty_id IN (SELECT id FROM faculties WHERE university_id IN ({SEEDED}))"),
        format!("DELETE FROM faculties WHERE university_id IN ({SEEDED})"),
        format!("DELETE FROM academic_years WHERE university_id IN ({SEEDED})"),
    ];

    let mut tx = db.begin().await?;
    for statement in &statements {
        sqlx::query(statement)
            .bind(email_pattern)
            .execute(&mut *tx)
            .await?;
    }
    let result = sqlx::query(&format!("DELETE FROM universities WHERE id IN ({SEEDED})"))
        .bind(email_pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    tx.commit().await?;

    println!(
        "   ✓ Deleted {} universities in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
