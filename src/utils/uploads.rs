//! Storing uploaded files through the configured [`FileStorage`].

use futures::future::join_all;
use tracing::{info, warn};
use unidocs_core::{AppError, FileStorage, file_storage::upload_key};
use unidocs_observability::track_upload_stored;

use crate::utils::multipart::UploadedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub key: String,
    pub url: String,
}

/// Stores one file as `{prefix}/{uuid}-{file name}`.
pub async fn store_file(
    storage: &dyn FileStorage,
    prefix: &str,
    file: &UploadedFile,
) -> Result<StoredFile, AppError> {
    let key = upload_key(prefix, &file.file_name);

    storage
        .save(&key, &file.content_type, &file.bytes)
        .await
        .map_err(|e| e.into_app_error())?;
    let url = storage.get_url(&key).map_err(|e| e.into_app_error())?;

    track_upload_stored(prefix, file.bytes.len());
    Ok(StoredFile { key, url })
}

/// Stores every file concurrently. The first failure fails the whole batch
/// and the files already written are removed.
pub async fn store_files(
    storage: &dyn FileStorage,
    prefix: &str,
    files: &[&UploadedFile],
) -> Result<Vec<StoredFile>, AppError> {
    let results = join_all(files.iter().map(|file| store_file(storage, prefix, file))).await;

    let mut stored = Vec::with_capacity(results.len());
    let mut failure = None;
    for result in results {
        match result {
            Ok(file) => stored.push(file),
            Err(e) if failure.is_none() => failure = Some(e),
            Err(_) => {}
        }
    }

    if let Some(e) = failure {
        remove_files(storage, &stored).await;
        return Err(e);
    }

    info!(prefix = %prefix, count = stored.len(), "Uploads stored");
    Ok(stored)
}

/// Best-effort cleanup after a failed request.
pub async fn remove_files(storage: &dyn FileStorage, files: &[StoredFile]) {
    join_all(files.iter().map(|file| async move {
        if let Err(e) = storage.delete(&file.key).await {
            warn!(key = %file.key, error = %e, "Failed to remove stored file");
        }
    }))
    .await;
}

/// Removes a file previously stored under `url`. URLs not served by the
/// storage backend are left alone.
pub async fn remove_url(storage: &dyn FileStorage, url: &str) {
    match storage.key_for_url(url) {
        Some(key) => {
            if let Err(e) = storage.delete(&key).await {
                warn!(key = %key, error = %e, "Failed to remove stored file");
            }
        }
        None => warn!(url = %url, "Stored file URL does not belong to this storage"),
    }
}
