//! Query endpoint tests using wiremock.
//!
//! These tests verify sync and streaming query submission against the
//! POST /sessions/{id}/query endpoint over the production reqwest
//! adapter, including SSE decoding of the streamed body.

use ondemand_chat::client::OnDemandClient;
use ondemand_chat::config::ClientConfig;
use ondemand_chat::error::OnDemandError;
use ondemand_chat::models::{StreamEvent, StreamStatus};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> OnDemandClient {
    let mut config = ClientConfig::new("test-api-key", "test-user");
    config.base_url = server.uri();
    OnDemandClient::new(config)
}

#[tokio::test]
async fn test_sync_query_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions/sess-1/query"))
        .and(header("apikey", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "answer": "Paris" }
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let body = client
        .submit_query_sync("sess-1", "What is the capital of France?")
        .await
        .unwrap();

    assert_eq!(body["data"]["answer"], "Paris");
}

#[tokio::test]
async fn test_sync_query_sends_full_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions/sess-1/query"))
        .and(wiremock::matchers::body_partial_json(serde_json::json!({
            "endpointId": "predefined-openai-gpt4.1",
            "query": "hello",
            "responseMode": "sync",
            "reasoningMode": "medium",
            "modelConfigs": {
                "temperature": 0.7,
                "topP": 1.0,
                "maxTokens": 0
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    client.submit_query_sync("sess-1", "hello").await.unwrap();
}

#[tokio::test]
async fn test_sync_query_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions/sess-1/query"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "message": "Rate limit exceeded"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client.submit_query_sync("sess-1", "q").await;

    match result {
        Err(OnDemandError::ServerError { status, message }) => {
            assert_eq!(status, 429);
            assert_eq!(message, "Rate limit exceeded");
        }
        other => panic!("Expected ServerError with status 429, got {:?}", other),
    }
}

#[tokio::test]
async fn test_stream_query_decodes_events() {
    let mock_server = MockServer::start().await;

    let sse_body = "data: {\"eventType\":\"answer\",\"answer\":\"Once\"}\n\n\
                    data: {\"eventType\":\"answer\",\"answer\":\" upon\"}\n\n\
                    data: [DONE]\n\n";

    Mock::given(method("POST"))
        .and(path("/sessions/sess-1/query"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(sse_body, "text/event-stream"),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let mut events = Vec::new();
    let status = client
        .submit_query_stream("sess-1", "tell a story", |event| events.push(event))
        .await
        .unwrap();

    assert_eq!(status, StreamStatus::FinishedEarly);
    assert_eq!(events.len(), 2);
    match &events[0] {
        StreamEvent::Json(value) => assert_eq!(value["answer"], "Once"),
        other => panic!("Expected JSON event, got {:?}", other),
    }
}

#[tokio::test]
async fn test_stream_query_without_done_sentinel() {
    let mock_server = MockServer::start().await;

    let sse_body = "data: {\"a\":1}\n\ndata: plain text event\n\n";

    Mock::given(method("POST"))
        .and(path("/sessions/sess-1/query"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(sse_body, "text/event-stream"),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let mut events = Vec::new();
    let status = client
        .submit_query_stream("sess-1", "q", |event| events.push(event))
        .await
        .unwrap();

    assert_eq!(status, StreamStatus::Finished);
    assert_eq!(
        events,
        vec![
            StreamEvent::Json(serde_json::json!({"a": 1})),
            StreamEvent::Raw("plain text event".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_stream_query_error_status_reports_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions/sess-1/query"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client.submit_query_stream("sess-1", "q", |_| {}).await;

    match result {
        Err(OnDemandError::ServerError { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "forbidden");
        }
        other => panic!("Expected ServerError with status 403, got {:?}", other),
    }
}
