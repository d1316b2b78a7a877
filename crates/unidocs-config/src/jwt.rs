use std::env;

use crate::env_or;

/// Settings used to verify bearer tokens minted by the identity provider.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HS256 secret shared with the identity provider
    pub secret: String,
    /// Expected `iss` claim, unchecked when `None`
    pub issuer: Option<String>,
    /// Clock skew tolerated on `exp`, in seconds
    pub leeway: u64,
    /// Lifetime of tokens minted by the development CLI, in seconds
    pub dev_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            issuer: env::var("JWT_ISSUER").ok().filter(|s| !s.is_empty()),
            leeway: env_or("JWT_LEEWAY", 30),
            dev_token_expiry: env_or("JWT_DEV_TOKEN_EXPIRY", 3600),
        }
    }
}
