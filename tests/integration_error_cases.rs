#![allow(clippy::unwrap_used)]
mod common;

use common::{TestApp, UnavailableStore};
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;

const UNKNOWN_ID: &str = "64bd837566b7829eaa7ea650";

async fn error_body(resp: reqwest::Response) -> Value {
    resp.json().await.unwrap()
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = TestApp::spawn().await;
    let url = app.message_url("not-a-valid-id");
    let body = json!({ "recipient": "Alice", "sender": "Bob", "content": "Hi" });

    for resp in [
        app.client.get(&url).send().await.unwrap(),
        app.client.delete(&url).send().await.unwrap(),
        app.client.patch(&url).json(&body).send().await.unwrap(),
    ] {
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_body(resp).await, json!({ "error": "Invalid message ID" }));
    }
}

#[tokio::test]
async fn test_patch_checks_id_before_body() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .patch(app.message_url("not-a-valid-id"))
        .header("Content-Type", "application/json")
        .body("{oops")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_body(resp).await, json!({ "error": "Invalid message ID" }));
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = TestApp::spawn().await;
    let url = app.message_url(UNKNOWN_ID);
    let body = json!({ "recipient": "Alice", "sender": "Bob", "content": "Hi" });

    for resp in [
        app.client.get(&url).send().await.unwrap(),
        app.client.delete(&url).send().await.unwrap(),
        app.client.patch(&url).json(&body).send().await.unwrap(),
    ] {
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(error_body(resp).await, json!({ "error": "Message not found" }));
    }
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(format!("{}/messages", app.server_url))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_body(resp).await, json!({ "error": "Failed to decode request body" }));

    let resp = app
        .client
        .post(format!("{}/messages", app.server_url))
        .json(&json!({ "recipient": "Alice", "sender": "Bob" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let id = app.send_message("Alice", "Bob", "Hi").await;
    let resp = app.client.patch(app.message_url(&id)).json(&json!({ "content": 42 })).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_body(resp).await, json!({ "error": "Invalid message data" }));
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let app = TestApp::spawn_with_store(Arc::new(UnavailableStore { stall: false })).await;

    let resp = app.client.get(format!("{}/messages", app.server_url)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_body(resp).await, json!({ "error": "Internal server error" }));

    let resp = app
        .client
        .post(format!("{}/messages", app.server_url))
        .json(&json!({ "recipient": "Alice", "sender": "Bob", "content": "Hi" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Malformed ids are still rejected before the store is consulted.
    let resp = app.client.get(app.message_url("nope")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stalled_store_times_out() {
    let app = TestApp::spawn_with_store(Arc::new(UnavailableStore { stall: true })).await;

    let resp = app.client.get(app.message_url(UNKNOWN_ID)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_body(resp).await, json!({ "error": "Store operation timed out" }));
}

#[tokio::test]
async fn test_failed_request_does_not_stop_service() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(app.message_url("not-a-valid-id")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let id = app.send_message("Alice", "Bob", "still here").await;
    let resp = app.client.get(app.message_url(&id)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
