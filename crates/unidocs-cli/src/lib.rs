//! # unidocs CLI
//!
//! Seeding utilities for local development and load testing.
//!
//! ```ignore
//! use unidocs_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(3); // 3 universities with default shape
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
