use std::sync::Arc;

use sqlx::PgPool;
use unidocs_config::{CorsConfig, JwtConfig, RateLimitConfig, StorageConfig};
use unidocs_core::{FileStorage, LocalFileStorage};
use unidocs_db::{init_db_pool, run_migrations};

use crate::middleware::rate_limit::{IpRateLimiter, build_limiter};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub storage_config: StorageConfig,
    pub storage: Arc<dyn FileStorage>,
    /// Per-IP limiter for every `/api` route, `None` when disabled.
    pub general_limiter: Option<Arc<IpRateLimiter>>,
    /// Stricter per-IP limiter for account creation.
    pub auth_limiter: Option<Arc<IpRateLimiter>>,
}

impl AppState {
    /// Builds the state around an existing pool with files stored on the
    /// local filesystem.
    pub fn new(
        db: PgPool,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        storage_config: StorageConfig,
        rate_limit_config: &RateLimitConfig,
    ) -> Self {
        let storage = LocalFileStorage::with_max_size(
            storage_config.root_dir.clone(),
            storage_config.public_url.clone(),
            storage_config.max_file_bytes,
        );

        Self {
            db,
            jwt_config,
            cors_config,
            storage_config,
            storage: Arc::new(storage),
            general_limiter: build_limiter(rate_limit_config.general_quota()),
            auth_limiter: build_limiter(rate_limit_config.auth_quota()),
        }
    }
}

/// Connects to Postgres, applies pending migrations and reads every config
/// from the environment.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let db = init_db_pool().await?;
    run_migrations(&db).await?;

    Ok(AppState::new(
        db,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
        StorageConfig::from_env(),
        &RateLimitConfig::from_env(),
    ))
}
