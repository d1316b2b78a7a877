//! Per-IP rate limiting on top of `governor`.
//!
//! The client IP comes from `X-Forwarded-For`, `X-Real-IP`, `Forwarded` or
//! the peer address, in that order. Requests whose IP cannot be determined
//! share one bucket.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tower_governor::key_extractor::{KeyExtractor, SmartIpKeyExtractor};
use tracing::warn;
use unidocs_core::AppError;

use crate::state::AppState;

pub type IpRateLimiter = DefaultKeyedRateLimiter<IpAddr>;

pub fn build_limiter(quota: Option<Quota>) -> Option<Arc<IpRateLimiter>> {
    quota.map(|quota| Arc::new(RateLimiter::keyed(quota)))
}

pub fn client_ip(req: &Request) -> IpAddr {
    SmartIpKeyExtractor
        .extract(req)
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

fn check(limiter: Option<&IpRateLimiter>, req: &Request) -> Result<(), AppError> {
    let Some(limiter) = limiter else {
        return Ok(());
    };

    let ip = client_ip(req);
    limiter.check_key(&ip).map_err(|_| {
        warn!(client.ip = %ip, path = %req.uri().path(), "Rate limit exceeded");
        AppError::new(
            StatusCode::TOO_MANY_REQUESTS,
            anyhow::anyhow!("Too many requests, please try again later."),
        )
    })
}

pub async fn general_rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match check(state.general_limiter.as_deref(), &req) {
        Ok(()) => next.run(req).await,
        Err(err) => err.into_response(),
    }
}

pub async fn auth_rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match check(state.auth_limiter.as_deref(), &req) {
        Ok(()) => next.run(req).await,
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use std::num::NonZeroU32;

    fn request_from(ip: &str) -> Request {
        Request::builder()
            .uri("/api/v1/auth/signup")
            .header("x-forwarded-for", ip)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_client_ip_from_forwarded_header() {
        assert_eq!(
            client_ip(&request_from("203.0.113.7")),
            "203.0.113.7".parse::<IpAddr>().unwrap()
        );

        let bare = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_ip(&bare), IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn test_burst_then_reject_per_ip() {
        let quota = Quota::per_minute(NonZeroU32::new(1).unwrap())
            .allow_burst(NonZeroU32::new(2).unwrap());
        let limiter = build_limiter(Some(quota)).unwrap();

        assert!(check(Some(limiter.as_ref()), &request_from("198.51.100.1")).is_ok());
        assert!(check(Some(limiter.as_ref()), &request_from("198.51.100.1")).is_ok());

        let err = check(Some(limiter.as_ref()), &request_from("198.51.100.1")).unwrap_err();
        assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);

        // other clients keep their own bucket
        assert!(check(Some(limiter.as_ref()), &request_from("198.51.100.2")).is_ok());
    }

    #[test]
    fn test_disabled_limiter_lets_everything_through() {
        assert!(build_limiter(None).is_none());
        for _ in 0..100 {
            assert!(check(None, &request_from("198.51.100.3")).is_ok());
        }
    }
}
