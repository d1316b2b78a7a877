#![cfg(feature = "db-tests")]

#[allow(dead_code)]
mod common;

use axum::http::StatusCode;
use common::{bearer, body_json, generate_unique_email, get_request, json_request, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use unidocs::unidocs_models::ids::UserId;

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_then_read_profile(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/signup",
            None,
            json!({
                "username": "mbuyi",
                "accountType": "owner",
                "email": "Mbuyi@UNIKIN.cd",
                "password": "password123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User created successfully");

    let uid: UserId = serde_json::from_value(body["uid"].clone()).unwrap();
    let response = app
        .oneshot(get_request("/api/v1/users/me", Some(&bearer(uid))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let profile = body_json(response).await;
    assert_eq!(profile["email"], "mbuyi@unikin.cd");
    assert_eq!(profile["accountType"], "owner");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_duplicate_email(pool: PgPool) {
    let app = setup_test_app(pool);
    let email = generate_unique_email();
    let payload = json!({
        "username": "dup",
        "accountType": "student",
        "email": email,
        "password": "password123"
    });

    let first = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/auth/signup", None, payload.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("POST", "/api/v1/auth/signup", None, payload))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body = body_json(second).await;
    assert_eq!(body["error"], "Email already in use");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_rejects_short_password(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/signup",
            None,
            json!({
                "username": "short",
                "accountType": "professor",
                "email": generate_unique_email(),
                "password": "123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_for_deleted_user_is_not_found(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(get_request("/api/v1/users/me", Some(&bearer(UserId::new()))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
