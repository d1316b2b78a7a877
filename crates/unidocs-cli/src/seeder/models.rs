//! Shapes of generated rows and the seeding configuration.

use unidocs_models::AccountType;
use unidocs_models::ids::{ClassroomId, DepartmentId, FacultyId, UniversityId, UserId};

/// Every seeded account uses this domain; `clear-seed` relies on it.
pub const SEED_EMAIL_DOMAIN: &str = "example.com";

pub struct UserSeed {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub account_type: AccountType,
    pub name: String,
    pub first_name: String,
}

pub struct UniversitySeed {
    pub name: String,
    pub description: String,
    pub address: String,
    pub owner: UserId,
}

/// A named row hanging off a parent (faculty of a university, and so on).
pub struct ChildSeed<P> {
    pub name: String,
    pub parent: P,
}

/// Where a generated student is enrolled.
#[derive(Clone, Copy)]
pub struct Placement {
    pub university: UniversityId,
    pub faculty: FacultyId,
    pub department: DepartmentId,
    pub classroom: ClassroomId,
}

/// Shape of the tree generated below each university.
#[derive(Clone)]
pub struct Structure {
    pub faculties: usize,
    pub departments_per_faculty: usize,
    pub classrooms_per_department: usize,
}

impl Default for Structure {
    fn default() -> Self {
        Self {
            faculties: 3,
            departments_per_faculty: 2,
            classrooms_per_department: 3,
        }
    }
}

#[derive(Clone)]
pub struct People {
    pub professors_per_university: usize,
    pub students_per_classroom: usize,
    pub courses_per_classroom: usize,
}

impl Default for People {
    fn default() -> Self {
        Self {
            professors_per_university: 5,
            students_per_classroom: 20,
            courses_per_classroom: 6,
        }
    }
}

#[derive(Clone, Default)]
pub struct SeedConfig {
    pub num_universities: usize,
    pub structure: Structure,
    pub people: People,
}

impl SeedConfig {
    pub fn new(num_universities: usize) -> Self {
        Self {
            num_universities,
            ..Default::default()
        }
    }

    pub fn with_structure(mut self, structure: Structure) -> Self {
        self.structure = structure;
        self
    }

    pub fn with_people(mut self, people: People) -> Self {
        self.people = people;
        self
    }

    pub fn classrooms_per_university(&self) -> usize {
        self.structure.faculties
            * self.structure.departments_per_faculty
            * self.structure.classrooms_per_department
    }

    /// Owner, professors and students of one university.
    pub fn users_per_university(&self) -> usize {
        1 + self.people.professors_per_university
            + self.classrooms_per_university() * self.people.students_per_classroom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_per_university() {
        let config = SeedConfig::new(2);
        // 3 faculties x 2 departments x 3 classrooms = 18 classrooms
        assert_eq!(config.classrooms_per_university(), 18);
        assert_eq!(config.users_per_university(), 1 + 5 + 18 * 20);
    }

    #[test]
    fn test_builders_override_defaults() {
        let config = SeedConfig::new(1)
            .with_structure(Structure {
                faculties: 1,
                departments_per_faculty: 1,
                classrooms_per_department: 2,
            })
            .with_people(People {
                professors_per_university: 1,
                students_per_classroom: 3,
                courses_per_classroom: 2,
            });
        assert_eq!(config.users_per_university(), 1 + 1 + 2 * 3);
    }
}
