use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use unidocs_core::AppError;

/// Claims carried by identity-provider tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// The subject parsed as a user id.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_parses_subject() {
        let id = Uuid::new_v4();
        let claims = Claims {
            sub: id.to_string(),
            email: None,
            iss: None,
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.user_id().unwrap(), id);
    }

    #[test]
    fn test_user_id_rejects_non_uuid_subject() {
        let claims = Claims {
            sub: "firebase-uid-123".to_string(),
            email: None,
            iss: None,
            exp: 0,
            iat: 0,
        };
        let err = claims.user_id().unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_optional_claims_are_skipped() {
        let claims = Claims {
            sub: "x".into(),
            email: None,
            iss: None,
            exp: 1,
            iat: 1,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("email").is_none());
        assert!(json.get("iss").is_none());
    }
}
