//! Prometheus metrics: HTTP middleware plus a few business counters.
//!
//! The helpers are no-ops when observability is disabled. Without an
//! installed recorder the `metrics` macros discard values, so tests can call
//! them freely.

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::{Duration, Instant};

use crate::is_observability_enabled;

const DURATION_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Installs the global Prometheus recorder and spawns its upkeep task.
/// Returns `None` when observability is disabled.
pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            DURATION_BUCKETS,
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(latency);

    let status_category = match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    };
    counter!("http_requests_by_status", "status_category" => status_category).increment(1);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router served on the metrics listener.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_user_signed_up(account_type: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("users_signed_up_total", "account_type" => account_type.to_string()).increment(1);
}

/// Counts created records per entity (`university`, `faculty`, ...).
pub fn track_record_created(entity: &'static str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("records_created_total", "entity" => entity).increment(1);
}

pub fn track_document_generated(document_type: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("documents_generated_total", "document_type" => document_type.to_string())
        .increment(1);
}

pub fn track_upload_stored(prefix: &str, bytes: usize) {
    if !is_observability_enabled() {
        return;
    }
    counter!("uploads_stored_total", "prefix" => prefix.to_string()).increment(1);
    histogram!("upload_size_bytes", "prefix" => prefix.to_string()).record(bytes as f64);
}
