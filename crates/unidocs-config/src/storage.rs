use std::env;
use std::path::PathBuf;

use crate::env_or;

/// Where uploads are written and how they are served back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub root_dir: PathBuf,
    /// Public URL prefix mapped onto `root_dir`
    pub public_url: String,
    /// Per-file limit in bytes
    pub max_file_bytes: usize,
    /// Files accepted per `Image` document; logos always take one
    pub max_files: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("storage/uploads"),
            public_url: "http://localhost:3000/files".to_string(),
            max_file_bytes: 3 * 1024 * 1024,
            max_files: 10,
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            root_dir: env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.root_dir),
            public_url: env::var("STORAGE_PUBLIC_URL").unwrap_or(defaults.public_url),
            max_file_bytes: env_or("UPLOAD_MAX_BYTES", defaults.max_file_bytes),
            max_files: env_or("UPLOAD_MAX_FILES", defaults.max_files),
        }
    }

    /// Request body ceiling for multipart routes, with room for form fields.
    pub fn body_limit(&self) -> usize {
        self.max_file_bytes
            .saturating_mul(self.max_files.max(1))
            .saturating_add(64 * 1024)
    }
}
