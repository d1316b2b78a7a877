//! File storage for uploaded university logos and document images.
//!
//! Handlers never touch the filesystem directly: they go through the
//! [`FileStorage`] trait so another backend can be plugged in without
//! changing business logic.
//!
//! # Example
//!
//! ```ignore
//! use unidocs_core::file_storage::{FileStorage, LocalFileStorage, upload_key};
//!
//! let storage = LocalFileStorage::new("./uploads".into(), "http://localhost:3000/files".into());
//! let key = upload_key("documents", "scan 01.png");
//! storage.save(&key, "image/png", &bytes).await?;
//! let url = storage.get_url(&key)?;
//! ```

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use axum::http::StatusCode;
use tokio::fs;
use uuid::Uuid;

use crate::errors::AppError;

pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Abstract trait for file storage backends.
pub trait FileStorage: Send + Sync {
    /// Store `content` under `key` and return the key.
    fn save<'a>(
        &'a self,
        key: &'a str,
        content_type: &'a str,
        content: &'a [u8],
    ) -> StorageFuture<'a, String>;

    /// Remove a stored file. Missing files are not an error.
    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()>;

    /// Public URL under which a stored file is served.
    fn get_url(&self, key: &str) -> Result<String, StorageError>;

    /// Inverse of [`FileStorage::get_url`]. `None` for URLs this backend
    /// does not serve.
    fn key_for_url(&self, url: &str) -> Option<String>;
}

#[derive(Debug)]
pub enum StorageError {
    /// File exceeds maximum allowed size.
    InvalidFileSize { max_bytes: usize },

    IoError(std::io::Error),

    /// Invalid storage key format.
    InvalidKey(String),
}

impl StorageError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidFileSize { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InvalidKey(_) => StatusCode::BAD_REQUEST,
            Self::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_app_error(self) -> AppError {
        AppError::new(self.status(), self)
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileSize { max_bytes } => {
                write!(f, "File exceeds maximum size of {} bytes", max_bytes)
            }
            Self::IoError(e) => write!(f, "I/O error: {}", e),
            Self::InvalidKey(msg) => write!(f, "Invalid storage key: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

/// Builds a unique key `"{prefix}/{uuid}-{file_name}"`.
///
/// Characters outside `[A-Za-z0-9._-]` in the file name become `_`, and path
/// components are stripped.
pub fn upload_key(prefix: &str, file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim_start_matches('.');

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .replace("..", "_");

    let sanitized = if sanitized.is_empty() {
        "file".to_string()
    } else {
        sanitized
    };

    format!("{}/{}-{}", prefix.trim_matches('/'), Uuid::new_v4(), sanitized)
}

/// Stores files under a local directory and serves them from `base_url`.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    base_dir: PathBuf,
    base_url: String,
    max_file_size: usize,
}

impl LocalFileStorage {
    /// 3 MB limit, any content type.
    pub fn new(base_dir: PathBuf, base_url: String) -> Self {
        Self::with_max_size(base_dir, base_url, 3 * 1024 * 1024)
    }

    pub fn with_max_size(base_dir: PathBuf, base_url: String, max_file_size: usize) -> Self {
        Self {
            base_dir,
            base_url,
            max_file_size,
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Validate storage key format to prevent path traversal.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Key must not be empty, contain '..', or start with '/'".to_string(),
            ));
        }

        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '/' || c == '.')
        {
            return Err(StorageError::InvalidKey(
                "Key contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }

}

impl FileStorage for LocalFileStorage {
    fn save<'a>(
        &'a self,
        key: &'a str,
        content_type: &'a str,
        content: &'a [u8],
    ) -> StorageFuture<'a, String> {
        Box::pin(async move {
            Self::validate_key(key)?;

            if content.len() > self.max_file_size {
                return Err(StorageError::InvalidFileSize {
                    max_bytes: self.max_file_size,
                });
            }

            let file_path = self.base_dir.join(key);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::write(&file_path, content).await?;

            tracing::debug!(key = %key, content_type = %content_type, bytes = content.len(), "Stored file");
            Ok(key.to_string())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            Self::validate_key(key)?;

            match fs::remove_file(self.base_dir.join(key)).await {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn get_url(&self, key: &str) -> Result<String, StorageError> {
        Self::validate_key(key)?;
        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), key))
    }

    fn key_for_url(&self, url: &str) -> Option<String> {
        let key = url
            .strip_prefix(self.base_url.trim_end_matches('/'))?
            .strip_prefix('/')?;
        Self::validate_key(key).ok()?;
        Some(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage() -> (LocalFileStorage, PathBuf) {
        let dir = std::env::temp_dir().join(format!("unidocs-storage-{}", Uuid::new_v4()));
        (
            LocalFileStorage::with_max_size(dir.clone(), "http://localhost:3000/files".into(), 16),
            dir,
        )
    }

    #[test]
    fn test_validate_key_accepts_valid_keys() {
        assert!(LocalFileStorage::validate_key("universities/logo.png").is_ok());
        assert!(LocalFileStorage::validate_key("documents/abc-123_scan.jpg").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_path_traversal() {
        assert!(LocalFileStorage::validate_key("../../../etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("/etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("..\\windows\\system32").is_err());
    }

    #[test]
    fn test_upload_key_sanitizes_file_name() {
        let key = upload_key("documents", "../My Scan (1).png");
        assert!(key.starts_with("documents/"));
        assert!(key.ends_with("-My_Scan__1_.png"));
        assert!(LocalFileStorage::validate_key(&key).is_ok());
    }

    #[test]
    fn test_upload_key_is_unique() {
        assert_ne!(upload_key("documents", "a.png"), upload_key("documents", "a.png"));
    }

    #[test]
    fn test_upload_key_handles_empty_name() {
        let key = upload_key("universities", "");
        assert!(key.ends_with("-file"));
    }

    #[test]
    fn test_get_url_handles_trailing_slash() {
        let storage = LocalFileStorage::new(
            PathBuf::from("./uploads"),
            "http://localhost:3000/files/".to_string(),
        );
        let url = storage.get_url("universities/logo.png").unwrap();
        assert_eq!(url, "http://localhost:3000/files/universities/logo.png");
    }

    #[test]
    fn test_key_for_url_reverses_get_url() {
        let storage = LocalFileStorage::new(
            PathBuf::from("./uploads"),
            "http://localhost:3000/files".to_string(),
        );
        let url = storage.get_url("universities/abc-logo.png").unwrap();

        assert_eq!(
            storage.key_for_url(&url).as_deref(),
            Some("universities/abc-logo.png")
        );
        assert_eq!(storage.key_for_url("https://cdn.example.com/logo.png"), None);
        assert_eq!(
            storage.key_for_url("http://localhost:3000/files/../secret"),
            None
        );
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            StorageError::InvalidFileSize { max_bytes: 1 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            StorageError::InvalidKey("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_save_and_delete_round_trip() {
        let (storage, dir) = temp_storage();

        let key = storage
            .save("documents/a.png", "image/png", b"png-bytes")
            .await
            .unwrap();
        assert_eq!(key, "documents/a.png");
        assert!(dir.join("documents/a.png").exists());

        storage.delete(&key).await.unwrap();
        assert!(!dir.join("documents/a.png").exists());
        storage.delete(&key).await.unwrap();

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_save_rejects_oversized() {
        let (storage, _dir) = temp_storage();

        let too_big = vec![0u8; 17];
        assert!(matches!(
            storage.save("documents/big.png", "image/png", &too_big).await,
            Err(StorageError::InvalidFileSize { max_bytes: 16 })
        ));
    }

    #[tokio::test]
    async fn test_save_accepts_octet_stream() {
        let (storage, dir) = temp_storage();

        let key = storage
            .save("documents/scan.bin", "application/octet-stream", b"raw-scan")
            .await
            .unwrap();
        assert_eq!(std::fs::read(dir.join(&key)).unwrap(), b"raw-scan");

        let _ = std::fs::remove_dir_all(dir);
    }
}
