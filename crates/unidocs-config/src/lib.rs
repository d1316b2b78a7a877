//! # unidocs config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: verification settings for identity-provider tokens
//! - [`cors`]: allowed browser origins
//! - [`rate_limit`]: per-IP request quotas
//! - [`storage`]: upload directory, public URL and size limits
//! - [`server`]: listen addresses
//!
//! Every struct has a `from_env()` constructor that falls back to development
//! defaults when a variable is missing or unparsable.

pub mod cors;
pub mod jwt;
pub mod rate_limit;
pub mod server;
pub mod storage;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
