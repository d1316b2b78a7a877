//! # unidocs auth
//!
//! Bearer tokens are issued by an external identity provider and signed with
//! a shared HS256 secret. This crate only reads them:
//!
//! - [`claims`]: the claim set the identity provider emits
//! - [`jwt`]: signature, expiry and issuer verification
//!
//! A development helper, [`create_dev_token`], mints tokens with the same
//! secret for local tooling and tests.
//!
//! # Example
//!
//! ```ignore
//! use unidocs_auth::verify_token;
//! use unidocs_config::JwtConfig;
//!
//! let claims = verify_token(token, &JwtConfig::from_env())?;
//! let user_id = claims.user_id()?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_dev_token, verify_token};
