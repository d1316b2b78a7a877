#[cfg(all(test, feature = "db-tests"))]
pub mod fixtures;
pub mod multipart;
pub mod records;
pub mod sql;
pub mod uploads;
