use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use triage_recommender::{
    build_router, AppState, CompletionService, DepartmentCatalog, GeminiClient, GeminiConfig,
    Recommender, UpstreamError,
};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    let mut config = GeminiConfig::new("test-api-key");
    config.base_url = server.url("/v1beta");
    GeminiClient::new(config).unwrap()
}

fn completion_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"parts": [{"text": text}], "role": "model"},
            "finishReason": "STOP",
            "index": 0
        }],
        "modelVersion": "gemini-2.0-flash"
    })
}

#[tokio::test]
async fn test_complete_sends_prompt_and_key() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(GENERATE_PATH)
                .header("x-goog-api-key", "test-api-key")
                .body_contains("hello there");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(completion_body("Dermatologi\n"));
        })
        .await;

    let client = client_for(&server);
    let text = client.complete("hello there").await.unwrap();

    api_mock.assert_async().await;
    assert_eq!(text, "Dermatologi\n");
    assert_eq!(client.model(), "gemini-2.0-flash");
}

#[tokio::test]
async fn test_api_key_is_not_sent_in_query() {
    let server = MockServer::start_async().await;
    let leaky = server
        .mock_async(|when, then| {
            when.method(POST).path(GENERATE_PATH).query_param_exists("key");
            then.status(500);
        })
        .await;
    let ok = server
        .mock_async(|when, then| {
            when.method(POST).path(GENERATE_PATH);
            then.status(200).json_body(completion_body("Neurology"));
        })
        .await;

    client_for(&server).complete("prompt").await.unwrap();

    assert_eq!(leaky.hits_async().await, 0);
    ok.assert_async().await;
}

#[tokio::test]
async fn test_invalid_key_maps_to_status_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GENERATE_PATH);
            then.status(400).json_body(json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT"
                }
            }));
        })
        .await;

    let err = client_for(&server).complete("prompt").await.unwrap_err();

    match err {
        UpstreamError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "API key not valid. Please pass a valid API key.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_and_auth_statuses() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1beta/models/limited:generateContent");
            then.status(429).body("slow down");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1beta/models/forbidden:generateContent");
            then.status(403).body("permission denied");
        })
        .await;

    let mut config = GeminiConfig::new("k");
    config.base_url = server.url("/v1beta");

    config.model = "limited".to_string();
    let err = GeminiClient::new(config.clone())
        .unwrap()
        .complete("p")
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::RateLimited { .. }));

    config.model = "forbidden".to_string();
    let err = GeminiClient::new(config).unwrap().complete("p").await.unwrap_err();
    assert!(matches!(err, UpstreamError::Unauthorized { status: 403, .. }));
}

#[tokio::test]
async fn test_empty_candidates() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GENERATE_PATH);
            then.status(200)
                .json_body(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        })
        .await;

    let err = client_for(&server).complete("prompt").await.unwrap_err();
    assert!(matches!(err, UpstreamError::EmptyCompletion));
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GENERATE_PATH);
            then.status(200)
                .delay(Duration::from_millis(1500))
                .json_body(completion_body("Neurology"));
        })
        .await;

    let mut config = GeminiConfig::new("k");
    config.base_url = server.url("/v1beta");
    config.timeout = Some(Duration::from_millis(200));

    let err = GeminiClient::new(config)
        .unwrap()
        .complete("prompt")
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Timeout));
}

#[tokio::test]
async fn test_connection_failure_is_http_error() {
    let mut config = GeminiConfig::new("k");
    // 保留給文件使用的埠口，不會有服務在監聽
    config.base_url = "http://127.0.0.1:9/v1beta".to_string();

    let err = GeminiClient::new(config)
        .unwrap()
        .complete("prompt")
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Http(_)));

    // 底層原因要一路帶出來，不能只剩 "error sending request"
    let message = err.to_string();
    assert!(message.starts_with("error sending request"), "{message}");
    assert!(message.len() > "error sending request".len(), "{message}");
    assert!(message.to_lowercase().contains("connect"), "{message}");
}

#[tokio::test]
async fn test_end_to_end_through_router() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(GENERATE_PATH)
                .body_contains("sakit perut, mual")
                .body_contains("female");
            then.status(200)
                .json_body(completion_body("  Gastroenterology\n"));
        })
        .await;

    let recommender = Recommender::new(
        Arc::new(client_for(&server)),
        DepartmentCatalog::standard(),
    );
    let app = build_router(AppState::new(recommender));

    let request = Request::builder()
        .method("POST")
        .uri("/recommend")
        .header("Content-Type", "application/json")
        .body(Body::from(
            json!({"gender": "female", "age": 34, "symptoms": ["sakit perut", "mual"]})
                .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, json!({"recommended_department": "Gastroenterology"}));
    api_mock.assert_async().await;
}

#[tokio::test]
async fn test_end_to_end_upstream_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GENERATE_PATH);
            then.status(500).json_body(json!({
                "error": {"code": 500, "message": "Internal error encountered.", "status": "INTERNAL"}
            }));
        })
        .await;

    let recommender = Recommender::new(
        Arc::new(client_for(&server)),
        DepartmentCatalog::standard(),
    );
    let app = build_router(AppState::new(recommender));

    let request = Request::builder()
        .method("POST")
        .uri("/recommend")
        .body(Body::from(
            json!({"gender": "male", "age": 50, "symptoms": ["nyeri dada"]}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        json["detail"],
        "Error processing request: completion service returned 500: Internal error encountered."
    );
}
