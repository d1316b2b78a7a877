#![cfg(feature = "db-tests")]

#[allow(dead_code)]
mod common;

use axum::http::StatusCode;
use common::{
    bearer, body_json, create_test_campus, create_test_user, generate_unique_email, get_request,
    json_request, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use unidocs::unidocs_models::AccountType;

#[sqlx::test(migrations = "./migrations")]
async fn test_new_academic_year_replaces_active_one(pool: PgPool) {
    let campus = create_test_campus(&pool).await;
    let auth = bearer(campus.owner);
    let app = setup_test_app(pool.clone());

    let mut ids = Vec::new();
    for name in ["2023-2024", "2024-2025"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/academic-years",
                Some(&auth),
                json!({ "name": name, "universityId": campus.university }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["academicYear"]["status"], "active");
        ids.push(body["academicYear"]["id"].as_str().unwrap().to_string());
    }

    let response = app
        .oneshot(get_request(
            &format!("/api/v1/academic-years/{}", ids[0]),
            Some(&auth),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "inactive");

    let active: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM academic_years WHERE university_id = $1 AND status = 'active'",
    )
    .bind(campus.university)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(active, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_activate_switches_active_year(pool: PgPool) {
    let campus = create_test_campus(&pool).await;
    let old = common::create_test_academic_year(&pool, campus.university, "2022-2023").await;
    sqlx::query("UPDATE academic_years SET status = 'inactive' WHERE id = $1")
        .bind(old)
        .execute(&pool)
        .await
        .unwrap();
    let current = common::create_test_academic_year(&pool, campus.university, "2023-2024").await;

    let app = setup_test_app(pool.clone());
    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/academic-years/{}/activate", old),
            Some(&bearer(campus.owner)),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["author"], "owner");

    let status: String =
        sqlx::query_scalar("SELECT status::text FROM academic_years WHERE id = $1")
            .bind(current)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, "inactive");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_professor_cannot_create_academic_year(pool: PgPool) {
    let campus = create_test_campus(&pool).await;
    let professor = create_test_user(&pool, &generate_unique_email(), AccountType::Professor).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/academic-years",
            Some(&bearer(professor)),
            json!({ "name": "2024-2025", "universityId": campus.university }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_academic_year_for_unknown_university(pool: PgPool) {
    let owner = create_test_user(&pool, &generate_unique_email(), AccountType::Owner).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/academic-years",
            Some(&bearer(owner)),
            json!({ "name": "2024-2025", "universityId": uuid::Uuid::new_v4() }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
