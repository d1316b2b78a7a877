//! User accounts and profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::enums::AccountType;
use crate::ids::UserId;

pub const SEXE_VALUES: [&str; 3] = ["male", "female", "other"];

/// Public profile of a user. The password hash never leaves the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "uid")]
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub sexe: Option<String>,
    pub age: Option<i32>,
    pub telephone: Option<String>,
    pub address: Option<String>,
    pub account_type: AccountType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupDto {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    pub account_type: AccountType,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub message: String,
    pub uid: UserId,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "firstName is required"))]
    pub first_name: String,
    #[validate(custom(function = "validate_sexe"))]
    pub sexe: String,
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    pub age: i32,
    #[validate(custom(function = "validate_telephone"))]
    pub telephone: String,
    pub address: String,
}

fn validate_sexe(value: &str) -> Result<(), ValidationError> {
    if SEXE_VALUES.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("sexe")
            .with_message("sexe must be one of: male, female, other".into()))
    }
}

fn validate_telephone(value: &str) -> Result<(), ValidationError> {
    if value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("telephone")
            .with_message("telephone must contain exactly 10 digits".into()))
    }
}
