//! Multipart form collection.
//!
//! Text fields are gathered into a JSON object and deserialized into the same
//! DTO types JSON routes use, then checked with their `validator` rules.
//! File fields are kept in memory with their metadata.

use anyhow::anyhow;
use axum::{body::Bytes, extract::Multipart, http::StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use unidocs_core::AppError;
use validator::Validate;

use crate::validator::{missing_field, validate};

#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Form field the file came in
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: Map<String, Value>,
    pub files: Vec<UploadedFile>,
}

impl MultipartForm {
    /// Reads the whole body. Files above `max_file_bytes` are a 413.
    pub async fn read(mut multipart: Multipart, max_file_bytes: usize) -> Result<Self, AppError> {
        let mut form = MultipartForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::bad_request(anyhow!("Invalid multipart body: {}", e)))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::bad_request(anyhow!("Failed to read file '{}': {}", file_name, e))
                    })?;

                    if bytes.len() > max_file_bytes {
                        return Err(file_too_large(&file_name, max_file_bytes));
                    }

                    form.files.push(UploadedFile {
                        field: name,
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                None => {
                    let text = field.text().await.map_err(|e| {
                        AppError::bad_request(anyhow!("Failed to read field '{}': {}", name, e))
                    })?;
                    form.fields.insert(name, Value::String(text));
                }
            }
        }

        Ok(form)
    }

    /// Deserializes the text fields into `T` and validates it.
    pub fn parse<T>(&self) -> Result<T, AppError>
    where
        T: DeserializeOwned + Validate,
    {
        let value: T = serde_json::from_value(Value::Object(self.fields.clone())).map_err(|e| {
            let message = e.to_string();
            match missing_field(&message) {
                Some(field) => AppError::bad_request(anyhow!("{} is required", field)),
                None => AppError::bad_request(anyhow!("Invalid form data: {}", message)),
            }
        })?;

        validate(&value)?;
        Ok(value)
    }

    /// Files sent under `field`, at most `max_files` of them.
    pub fn files_in(&self, field: &str, max_files: usize) -> Result<Vec<&UploadedFile>, AppError> {
        let files: Vec<&UploadedFile> = self
            .files
            .iter()
            .filter(|f| f.field == field && !f.bytes.is_empty())
            .collect();

        if files.len() > max_files {
            return Err(AppError::bad_request(anyhow!(
                "At most {} file(s) allowed in '{}'",
                max_files,
                field
            )));
        }

        Ok(files)
    }
}

fn file_too_large(file_name: &str, max_bytes: usize) -> AppError {
    AppError::new(
        StatusCode::PAYLOAD_TOO_LARGE,
        anyhow!(
            "File '{}' exceeds the maximum size of {} bytes",
            file_name,
            max_bytes
        ),
    )
}
