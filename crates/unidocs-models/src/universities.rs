//! University models. Universities are created from multipart forms so the
//! text fields are collected into [`UniversityForm`] before validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::UserSummary;
use crate::enums::RecordStatus;
use crate::ids::{UniversityId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct University {
    pub id: UniversityId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub logo: Option<String>,
    pub user_id: UserId,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// University with its owner resolved.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UniversityDetails {
    pub id: UniversityId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub logo: Option<String>,
    pub status: RecordStatus,
    #[schema(value_type = UserSummary)]
    pub user: Json<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Text fields of the create and update forms.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UniversityForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(max = 150, message = "address must be at most 150 characters"))]
    #[serde(default)]
    pub address: String,
}

/// OpenAPI shape of the multipart body.
#[derive(ToSchema)]
pub struct UniversityMultipart {
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    /// Logo, at most one file.
    #[schema(value_type = String, format = Binary)]
    pub images: Option<Vec<u8>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedUniversity {
    pub message: String,
    pub university: University,
}
