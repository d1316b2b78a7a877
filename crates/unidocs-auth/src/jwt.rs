use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;
use uuid::Uuid;

use unidocs_config::JwtConfig;
use unidocs_core::AppError;

use crate::claims::Claims;

/// Verifies signature, expiry and (when configured) issuer.
///
/// # Errors
///
/// Unauthorized with "Your token has expired" for an expired token and
/// "Invalid or expired token" for anything else that fails to verify.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = jwt_config.leeway;
    if let Some(issuer) = &jwt_config.issuer {
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!(error = %e, "Token verification failed");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::unauthorized("Your token has expired"),
            _ => AppError::unauthorized("Invalid or expired token"),
        }
    })
}

/// Mints a token the way the identity provider would. Development use only.
pub fn create_dev_token(
    user_id: Uuid,
    email: Option<&str>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.map(str::to_string),
        iss: jwt_config.issuer.clone(),
        exp: now + jwt_config.dev_token_expiry.max(1) as usize,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            issuer: None,
            leeway: 0,
            dev_token_expiry: 3600,
        }
    }

    #[test]
    fn test_verify_accepts_valid_token() {
        let user_id = Uuid::new_v4();
        let token = create_dev_token(user_id, Some("a@b.com"), &config()).unwrap();

        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = create_dev_token(Uuid::new_v4(), None, &config()).unwrap();
        let other = JwtConfig {
            secret: "other-secret".to_string(),
            ..config()
        };

        let err = verify_token(&token, &other).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.error.to_string(), "Invalid or expired token");
    }

    #[test]
    fn test_verify_reports_expiry() {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: None,
            iss: None,
            exp: now - 600,
            iat: now - 1200,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = verify_token(&token, &config()).unwrap_err();
        assert_eq!(err.error.to_string(), "Your token has expired");
    }

    #[test]
    fn test_verify_checks_issuer_when_configured() {
        let token = create_dev_token(Uuid::new_v4(), None, &config()).unwrap();
        let strict = JwtConfig {
            issuer: Some("https://identity.example.com".to_string()),
            ..config()
        };

        assert!(verify_token(&token, &strict).is_err());
    }

    #[test]
    fn test_verify_accepts_matching_issuer_only() {
        let issuer = JwtConfig {
            issuer: Some("https://identity.example.com".to_string()),
            ..config()
        };
        let other = JwtConfig {
            issuer: Some("https://elsewhere.example.com".to_string()),
            ..config()
        };

        let token = create_dev_token(Uuid::new_v4(), None, &issuer).unwrap();
        assert!(verify_token(&token, &issuer).is_ok());
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(verify_token("not.a.token", &config()).is_err());
    }
}
