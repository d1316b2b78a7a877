//! Postgres enum types shared by several tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Kind of account, decides which guards let a caller through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "account_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Owner,
    Professor,
    Student,
    Admin,
}

impl AccountType {
    pub const ALL: [AccountType; 4] = [
        AccountType::Owner,
        AccountType::Professor,
        AccountType::Student,
        AccountType::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Owner => "owner",
            AccountType::Professor => "professor",
            AccountType::Student => "student",
            AccountType::Admin => "admin",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(AccountType::Owner),
            "professor" => Ok(AccountType::Professor),
            "student" => Ok(AccountType::Student),
            "admin" => Ok(AccountType::Admin),
            other => Err(format!(
                "Unknown account type '{}'. Expected one of: owner, professor, student, admin",
                other
            )),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "record_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Active => "active",
            RecordStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a document carries: uploaded images or a generated transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "document_type")]
pub enum DocumentType {
    #[sqlx(rename = "Image")]
    #[serde(rename = "Image")]
    Image,
    #[sqlx(rename = "Releve de cotes")]
    #[serde(rename = "Releve de cotes")]
    ReleveDeCotes,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Image => "Image",
            DocumentType::ReleveDeCotes => "Releve de cotes",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    /// Exact match on the stored labels, the values clients send.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Image" => Ok(DocumentType::Image),
            "Releve de cotes" => Ok(DocumentType::ReleveDeCotes),
            _ => Err(
                "Invalid documentType. Allowed values are 'Image' or 'Releve de cotes'."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_parsing() {
        assert_eq!("owner".parse::<AccountType>().unwrap(), AccountType::Owner);
        assert_eq!(" Admin ".parse::<AccountType>().unwrap(), AccountType::Admin);
        assert!("lecturer".parse::<AccountType>().is_err());
    }

    #[test]
    fn test_account_type_serde_is_lowercase() {
        let json = serde_json::to_string(&AccountType::Professor).unwrap();
        assert_eq!(json, "\"professor\"");
        let back: AccountType = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(back, AccountType::Student);
    }

    #[test]
    fn test_document_type_labels() {
        assert_eq!(
            "Releve de cotes".parse::<DocumentType>().unwrap(),
            DocumentType::ReleveDeCotes
        );
        assert_eq!("Image".parse::<DocumentType>().unwrap(), DocumentType::Image);

        let err = "image".parse::<DocumentType>().unwrap_err();
        assert!(err.contains("'Image' or 'Releve de cotes'"));

        let json = serde_json::to_string(&DocumentType::ReleveDeCotes).unwrap();
        assert_eq!(json, "\"Releve de cotes\"");
    }

    #[test]
    fn test_record_status_default_is_active() {
        assert_eq!(RecordStatus::default(), RecordStatus::Active);
        assert_eq!(RecordStatus::Inactive.to_string(), "inactive");
    }
}
