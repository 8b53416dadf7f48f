//! OnDemand API client.
//!
//! This module provides the HTTP client for the OnDemand chat API:
//! session creation plus sync and streaming query submission, with the
//! streaming path decoded incrementally via [`FrameDecoder`].

use futures_util::StreamExt;
use serde_json::Value;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::OnDemandError;
use crate::models::{
    QueryRequest, ResponseMode, SessionRequest, SessionResponse, StreamEvent, StreamStatus,
};
use crate::sse::{FrameDecoder, SseFrame, StreamTail};
use crate::traits::{Headers, HttpClient};

/// Client for the OnDemand chat API.
///
/// Generic over the HTTP transport so the decode loop can be exercised
/// against a mock in tests; production code uses the reqwest adapter via
/// [`OnDemandClient::new`].
pub struct OnDemandClient<C = ReqwestHttpClient> {
    config: ClientConfig,
    http: C,
}

impl OnDemandClient<ReqwestHttpClient> {
    /// Create a client over the production reqwest transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http(config, ReqwestHttpClient::new())
    }
}

impl<C: HttpClient> OnDemandClient<C> {
    /// Create a client over an explicit transport.
    pub fn with_http(config: ClientConfig, http: C) -> Self {
        Self { config, http }
    }

    /// Get the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("apikey".to_string(), self.config.api_key.clone());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    fn sessions_url(&self) -> String {
        format!("{}/sessions", self.config.base_url)
    }

    fn query_url(&self, session_id: &str) -> String {
        format!("{}/sessions/{}/query", self.config.base_url, session_id)
    }

    fn build_query_request(&self, query: &str, response_mode: ResponseMode) -> QueryRequest {
        QueryRequest {
            endpoint_id: self.config.endpoint_id.clone(),
            query: query.to_string(),
            agent_ids: self.config.agent_ids.clone(),
            response_mode,
            reasoning_mode: self.config.reasoning_mode.clone(),
            model_configs: self.config.model_configs.clone(),
        }
    }

    /// Create a chat session scoped to the configured external user.
    ///
    /// Sends `POST /sessions` with no pre-attached agents and returns the
    /// identifier of the created session.
    pub async fn create_session(&self) -> Result<String, OnDemandError> {
        let request = SessionRequest {
            agent_ids: Vec::new(),
            external_user_id: self.config.external_user_id.clone(),
        };
        let body = serde_json::to_string(&request)?;

        let response = self
            .http
            .post(&self.sessions_url(), &body, &self.headers())
            .await?;

        if response.status != 201 {
            return Err(OnDemandError::ServerError {
                status: response.status,
                message: error_message(&response.body),
            });
        }

        let parsed: SessionResponse = response.json()?;
        match parsed.session_id() {
            Some(id) => {
                tracing::debug!(session_id = id, "chat session created");
                Ok(id.to_string())
            }
            None => Err(OnDemandError::MissingSessionId {
                body: String::from_utf8_lossy(&response.body).into_owned(),
            }),
        }
    }

    /// Submit a query in sync mode and return the parsed response body.
    pub async fn submit_query_sync(
        &self,
        session_id: &str,
        query: &str,
    ) -> Result<Value, OnDemandError> {
        let request = self.build_query_request(query, ResponseMode::Sync);
        let body = serde_json::to_string(&request)?;

        let response = self
            .http
            .post(&self.query_url(session_id), &body, &self.headers())
            .await?;

        if !response.is_success() {
            return Err(OnDemandError::ServerError {
                status: response.status,
                message: error_message(&response.body),
            });
        }

        Ok(response.json()?)
    }

    /// Submit a query in stream mode, dispatching each decoded event to
    /// `on_event` and returning the terminal status.
    ///
    /// When the `[DONE]` sentinel arrives mid-stream the byte source is
    /// dropped, releasing the connection, and the call returns
    /// [`StreamStatus::FinishedEarly`]. On natural end-of-stream any
    /// residual buffer content is reported at warn level and the call
    /// returns [`StreamStatus::Finished`].
    pub async fn submit_query_stream(
        &self,
        session_id: &str,
        query: &str,
        mut on_event: impl FnMut(StreamEvent) + Send,
    ) -> Result<StreamStatus, OnDemandError> {
        let request = self.build_query_request(query, ResponseMode::Stream);
        let body = serde_json::to_string(&request)?;

        let response = self
            .http
            .post_stream(&self.query_url(session_id), &body, &self.headers())
            .await?;

        if !response.is_success() {
            let message = match response.stream {
                Some(stream) => collect_text(stream).await,
                None => "Unknown error".to_string(),
            };
            return Err(OnDemandError::ServerError {
                status: response.status,
                message,
            });
        }

        let mut stream = response.stream.ok_or(OnDemandError::StreamUnavailable)?;
        let mut decoder = FrameDecoder::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(OnDemandError::Http)?;
            for frame in decoder.feed(&chunk) {
                match frame {
                    SseFrame::Json(value) => on_event(StreamEvent::Json(value)),
                    SseFrame::Raw(text) => on_event(StreamEvent::Raw(text)),
                    SseFrame::Done => {
                        // The server may hold the connection open after the
                        // sentinel; drop the source to release it.
                        drop(stream);
                        tracing::debug!("SSE stream end: [DONE]");
                        return Ok(StreamStatus::FinishedEarly);
                    }
                }
            }
        }

        match decoder.finish() {
            StreamTail::Done => tracing::debug!("SSE stream end: [DONE]"),
            StreamTail::Residual(text) => {
                tracing::warn!(residual = %text, "undispatched SSE data at end of stream");
            }
            StreamTail::Clean => {}
        }

        Ok(StreamStatus::Finished)
    }
}

/// Extract a human-readable message from an error response body.
///
/// Prefers the body's `message` field when the body is JSON, falling
/// back to the raw text.
fn error_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    String::from_utf8_lossy(body).into_owned()
}

/// Drain a byte stream into text, ignoring read errors past the first
/// bytes received.
async fn collect_text(
    mut stream: crate::traits::http::ByteStream,
) -> String {
    let mut collected = Vec::new();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => collected.extend_from_slice(&bytes),
            Err(_) => break,
        }
    }
    if collected.is_empty() {
        "Unknown error".to_string()
    } else {
        String::from_utf8_lossy(&collected).into_owned()
    }
}
