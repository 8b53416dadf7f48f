//! Session creation endpoint tests using wiremock.
//!
//! These tests verify that the OnDemandClient correctly calls the
//! POST /sessions endpoint over the production reqwest adapter.

use ondemand_chat::client::OnDemandClient;
use ondemand_chat::config::ClientConfig;
use ondemand_chat::error::OnDemandError;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a test API key.
fn test_api_key() -> String {
    "test-api-key".to_string()
}

/// Helper to create a client pointed at the mock server.
fn test_client(server: &MockServer) -> OnDemandClient {
    let mut config = ClientConfig::new(test_api_key(), "test-user");
    config.base_url = server.uri();
    OnDemandClient::new(config)
}

#[tokio::test]
async fn test_create_session_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions"))
        .and(header("apikey", test_api_key()))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({
            "agentIds": [],
            "externalUserId": "test-user"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": { "id": "session-abc-123" }
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let session_id = client.create_session().await.unwrap();

    assert_eq!(session_id, "session-abc-123");
}

#[tokio::test]
async fn test_create_session_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Invalid API key"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client.create_session().await;

    match result {
        Err(OnDemandError::ServerError { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid API key");
        }
        other => panic!("Expected ServerError with status 401, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_session_error_without_message_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "error": "internal" })),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client.create_session().await;

    // Without a `message` field the raw body is reported
    match result {
        Err(OnDemandError::ServerError { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("internal"));
        }
        other => panic!("Expected ServerError with status 500, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_session_missing_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": {}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let result = client.create_session().await;

    assert!(matches!(result, Err(OnDemandError::MissingSessionId { .. })));
}

#[tokio::test]
async fn test_create_session_connection_refused() {
    let mut config = ClientConfig::new(test_api_key(), "test-user");
    // Port that is not listening
    config.base_url = "http://127.0.0.1:59999".to_string();
    let client = OnDemandClient::new(config);

    let result = client.create_session().await;
    assert!(matches!(result, Err(OnDemandError::Http(_))));
}
