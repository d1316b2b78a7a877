use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Console-only logging used when `OBSERVABILITY_ENABLED=false`.
///
/// `LOG_LEVEL` (default `info`) applies to targets starting with `crate_name`;
/// noisy dependencies stay at `warn`. `RUST_LOG` overrides everything.
pub fn init_basic_console_logging(crate_name: &str) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={},tower_http=warn,hyper=warn,tonic=warn,h2=warn,sqlx=warn",
            crate_name, log_level
        ))
    });

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(console_layer).init();

    eprintln!("ℹ️  Observability disabled (OBSERVABILITY_ENABLED=false), console logging only");
}
