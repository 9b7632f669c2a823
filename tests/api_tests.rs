use std::sync::Arc;

use axum::{body::Body, Router};
use fixture_ref::api::create_app;
use fixture_ref::AliasConfig;
use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use serde_json::{json, Value};
use tower::util::ServiceExt;

fn create_test_app() -> Router {
    let config = AliasConfig::builder()
        .map(["I", "myself"], "user: \"me\"")
        .build()
        .unwrap();
    create_app(Arc::new(config))
}

async fn post_parse(body: Value) -> (StatusCode, Value) {
    let response = create_test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/parse")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let response = create_test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_parse_text_reference() {
    let (status, body) = post_parse(json!({"reference": "the 2nd colour"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"reference": {"factory": "colour", "index": 1}}));
}

#[tokio::test]
async fn test_parse_structured_reference() {
    let (status, body) = post_parse(json!({"reference": {"factory": "colour", "label": "red"}})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"reference": {"factory": "colour", "label": "red"}}));
}

#[tokio::test]
async fn test_parse_uses_server_aliases() {
    let (status, body) = post_parse(json!({"reference": "myself"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"reference": {"factory": "user", "label": "me"}}));
}

#[tokio::test]
async fn test_parse_error_returns_bad_request() {
    let (status, body) = post_parse(json!({"reference": "awesome colour"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["reason"], "superfluous_content");
    assert!(body["error"].as_str().unwrap().contains("superfluous"));
    assert!(body.get("reference").is_none());
}

#[tokio::test]
async fn test_structured_both_index_and_label() {
    let (status, body) = post_parse(json!({"reference": {"label": "fred", "index": 0}})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["reason"], "both_index_and_label");
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let response = create_test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/parse")
                .header("content-type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
