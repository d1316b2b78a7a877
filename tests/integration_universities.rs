#![cfg(feature = "db-tests")]

#[allow(dead_code)]
mod common;

use axum::http::{Method, StatusCode};
use common::{
    FilePart, bearer, body_json, create_test_user, generate_unique_email, get_request,
    multipart_request, multipart_upload_request, setup_test_app,
};
use sqlx::PgPool;
use tower::ServiceExt;
use unidocs::unidocs_models::AccountType;

#[sqlx::test(migrations = "./migrations")]
async fn test_owner_creates_university_without_logo(pool: PgPool) {
    let owner = create_test_user(&pool, &generate_unique_email(), AccountType::Owner).await;
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/api/v1/universities",
            &bearer(owner),
            &[
                ("name", "Universite de Kinshasa"),
                ("description", "Universite publique"),
                ("address", "Mont Amba, Lemba"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let university = &body["university"];
    assert_eq!(university["name"], "Universite de Kinshasa");
    assert_eq!(university["status"], "active");
    assert!(university["logo"].is_null());

    let id = university["id"].as_str().unwrap();
    let response = app
        .oneshot(get_request(
            &format!("/api/v1/universities/{}", id),
            Some(&bearer(owner)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

fn served_path(url: &str) -> String {
    url.trim_start_matches("http://localhost:3000").to_string()
}

fn logo_part(file_name: &str) -> FilePart<'_> {
    FilePart {
        field: "images",
        file_name,
        content_type: "image/png",
        bytes: b"\x89PNG logo",
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_new_logo_replaces_and_removes_the_old_one(pool: PgPool) {
    let owner = create_test_user(&pool, &generate_unique_email(), AccountType::Owner).await;
    let app = setup_test_app(pool);
    let fields = [
        ("name", "Universite de Lubumbashi"),
        ("description", "Universite publique"),
        ("address", "Route Kasapa"),
    ];

    let response = app
        .clone()
        .oneshot(multipart_upload_request(
            "/api/v1/universities",
            &bearer(owner),
            &fields,
            &[logo_part("old.png")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["university"]["id"].as_str().unwrap().to_string();
    let old_logo = served_path(body["university"]["logo"].as_str().unwrap());
    assert!(old_logo.starts_with("/files/universities/"));

    let response = app.clone().oneshot(get_request(&old_logo, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut update = multipart_upload_request(
        &format!("/api/v1/universities/{}", id),
        &bearer(owner),
        &fields,
        &[logo_part("new.png")],
    );
    *update.method_mut() = Method::PUT;
    let response = app.clone().oneshot(update).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/universities/{}", id), Some(&bearer(owner))))
        .await
        .unwrap();
    let new_logo = served_path(body_json(response).await["logo"].as_str().unwrap());
    assert_ne!(new_logo, old_logo);
    assert!(new_logo.ends_with("-new.png"));

    let response = app.clone().oneshot(get_request(&new_logo, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let response = app.oneshot(get_request(&old_logo, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_create_university(pool: PgPool) {
    let student = create_test_user(&pool, &generate_unique_email(), AccountType::Student).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(multipart_request(
            "/api/v1/universities",
            &bearer(student),
            &[("name", "Nope")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "You do not have the required role to perform this action."
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_university_list_is_paginated(pool: PgPool) {
    let owner = create_test_user(&pool, &generate_unique_email(), AccountType::Owner).await;
    for name in ["UNIKIN", "UNILU", "UPN"] {
        sqlx::query("INSERT INTO universities (name, user_id) VALUES ($1, $2)")
            .bind(name)
            .bind(owner)
            .execute(&pool)
            .await
            .unwrap();
    }
    let app = setup_test_app(pool);

    let response = app
        .oneshot(get_request(
            "/api/v1/universities?page=2&limit=2",
            Some(&bearer(owner)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["totalItems"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["currentPage"], 2);
    assert_eq!(page["currentItems"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_university_is_not_found(pool: PgPool) {
    let owner = create_test_user(&pool, &generate_unique_email(), AccountType::Owner).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(get_request(
            &format!("/api/v1/universities/{}", uuid::Uuid::new_v4()),
            Some(&bearer(owner)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
