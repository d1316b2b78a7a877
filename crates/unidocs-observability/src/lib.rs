//! Unidocs Observability
//!
//! - Tracing: console, daily rolling files and optional OpenTelemetry export
//! - Request logging middleware
//! - Prometheus metrics and business counters
//!
//! Everything is on by default. `OBSERVABILITY_ENABLED=false` switches the
//! server to plain console logging and turns the metrics helpers into no-ops.
//!
//! ```no_run
//! use unidocs_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_tracing("unidocs")?;
//!     // ... application code ...
//!     shutdown_tracer().await;
//!     Ok(())
//! }
//! ```

use std::sync::OnceLock;

pub mod basic_logging;
pub mod logging;
pub mod metrics;

pub use basic_logging::init_basic_console_logging;
pub use logging::{init_tracing, logging_middleware, shutdown_tracer};
pub use metrics::{
    init_metrics, metrics_app, metrics_middleware, track_document_generated, track_record_created,
    track_upload_stored, track_user_signed_up,
};
pub use metrics_exporter_prometheus::PrometheusHandle;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Reads `OBSERVABILITY_ENABLED` once. Anything but `false`/`0` enables it.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(true)
    })
}

fn parse_flag(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    value != "false" && value != "0"
}
