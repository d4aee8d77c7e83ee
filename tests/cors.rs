//! Origin policy: only the configured frontend may make cross-origin requests.

mod common;
use common::*;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

fn request(method: Method, origin: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri("/api/products");
    if let Some(origin) = origin {
        builder = builder.header(header::ORIGIN, origin);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn matching_origin_gets_cors_headers() {
    let app = test_app();
    let response = app.oneshot(request(Method::GET, Some(FRONTEND))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        FRONTEND
    );
}

#[tokio::test]
async fn other_origin_is_rejected_before_routing() {
    let app = test_app();
    let response = app
        .oneshot(request(Method::GET, Some("https://evil.example.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Error de cors");
}

#[tokio::test]
async fn origin_must_match_exactly() {
    let app = test_app();
    let response = app
        .oneshot(request(Method::GET, Some("http://localhost:5173/")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn requests_without_origin_pass_through() {
    let app = test_app();
    let response = app.oneshot(request(Method::GET, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn preflight_from_frontend_is_answered() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/products/1")
                .header(header::ORIGIN, FRONTEND)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let methods = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("PATCH"));
}
