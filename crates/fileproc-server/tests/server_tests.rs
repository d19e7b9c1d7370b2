//! Integration tests for the top-level routes and middleware

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};

mod helpers;
use helpers::*;

#[tokio::test]
async fn test_root_banner() {
    let app = test_app();

    let (status, bytes) =
        send_raw(&app, Request::builder().uri("/").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "File Processor is running. POST /api/v1/files/upload"
    );
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app();

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = test_app();

    let (status, _) = get(&app, "/api/v1/nothing-here").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_preflight_for_default_origin() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/files/upload")
        .header(header::ORIGIN, "http://localhost:4200")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:4200"
    );
}

#[tokio::test]
async fn test_cors_ignores_unknown_origin() {
    let app = test_app();
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://elsewhere.example")
        .body(Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
