//! Integration tests for the relay router.
//!
//! These tests verify that routes are wired to handlers and that forward
//! outcomes map to the documented status codes and bodies.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use arcrelay_axum::{AxumContext, CorsConfig, create_router};
use common::ports::{Reply, StaticPort};
use common::{body_bytes, body_json, chat_request, get_request};

fn router_with(port: &Arc<StaticPort>) -> axum::Router {
    let ctx = AxumContext::from_port(port.clone(), 300);
    create_router(ctx, &CorsConfig::AllowAll)
}

fn payload_port() -> Arc<StaticPort> {
    Arc::new(StaticPort::new(Reply::Payload(json!({
        "error": null,
        "output": [{ "generated_text": "fn main() {}" }]
    }))))
}

#[tokio::test]
async fn root_returns_status_text() {
    let port = payload_port();
    let response = router_with(&port).oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_bytes(response).await;
    assert_eq!(
        std::str::from_utf8(&body).unwrap(),
        "✅ Arc AI Backend is running. POST /chat with JSON { prompt: '...' }"
    );
    assert_eq!(port.calls(), 0);
}

#[tokio::test]
async fn chat_passes_payload_through() {
    let port = payload_port();
    let response = router_with(&port)
        .oneshot(chat_request(r#"{"prompt":"write hello world"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "error": null, "output": [{ "generated_text": "fn main() {}" }] })
    );
    assert_eq!(port.inputs(), vec!["write hello world".to_string()]);
}

#[tokio::test]
async fn chat_rejects_invalid_prompts_without_forwarding() {
    let port = payload_port();
    let app = router_with(&port);

    for body in [
        r#"{"prompt":"  "}"#,
        r#"{"prompt":""}"#,
        r#"{"prompt":42}"#,
        r#"{"prompt":null}"#,
        r#"{"message":"hi"}"#,
        r#"["hi"]"#,
        "not json",
    ] {
        let response = app.clone().oneshot(chat_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(
            body_json(response).await,
            json!({ "error": "prompt must be a non-empty string" }),
            "body: {body}"
        );
    }

    assert_eq!(port.calls(), 0);
}

#[tokio::test]
async fn chat_without_content_type_is_rejected() {
    let port = payload_port();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/chat")
        .body(axum::body::Body::from(r#"{"prompt":"hi"}"#))
        .unwrap();

    let response = router_with(&port).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(port.calls(), 0);
}

#[tokio::test]
async fn chat_upstream_failure_returns_500_with_details() {
    let port = Arc::new(StaticPort::new(Reply::Upstream {
        status: 503,
        body: "overloaded".to_string(),
    }));
    let response = router_with(&port)
        .oneshot(chat_request(r#"{"prompt":"hi"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Server error");
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("503"), "details: {details}");
    assert!(details.contains("overloaded"), "details: {details}");
}

#[tokio::test]
async fn chat_transport_failure_returns_500() {
    let port = Arc::new(StaticPort::new(Reply::Transport(
        "connection reset".to_string(),
    )));
    let response = router_with(&port)
        .oneshot(chat_request(r#"{"prompt":"hi"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["details"].as_str().unwrap().contains("connection reset"));
}

#[tokio::test]
async fn ping_reports_warm_model() {
    let port = payload_port();
    let response = router_with(&port)
        .oneshot(get_request("/ping"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"pong - model warmed");
    assert_eq!(port.inputs(), vec!["ping".to_string()]);
}

#[tokio::test]
async fn ping_swallows_failures() {
    for reply in [
        Reply::Upstream {
            status: 401,
            body: "unauthorized".to_string(),
        },
        Reply::Transport("dns failure".to_string()),
    ] {
        let port = Arc::new(StaticPort::new(reply));
        let response = router_with(&port)
            .oneshot(get_request("/ping"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_bytes(response).await,
            b"pong - ping attempt failed (ignored)"
        );
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let port = payload_port();
    let response = router_with(&port)
        .oneshot(get_request("/v1/models"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chat_requires_post() {
    let port = payload_port();
    let response = router_with(&port)
        .oneshot(get_request("/chat"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
