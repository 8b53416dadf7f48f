//! Request and response types for the OnDemand chat API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response mode requested for a query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Single buffered JSON response
    Sync,
    /// Server-sent-event stream
    Stream,
}

/// Model configuration attached to every query.
///
/// The API expects the full record on each request; the defaults mirror
/// the values the service documents for ad-hoc clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfigs {
    pub fulfillment_prompt: String,
    pub stop_sequences: Vec<String>,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
}

impl Default for ModelConfigs {
    fn default() -> Self {
        Self {
            fulfillment_prompt: String::new(),
            stop_sequences: Vec::new(),
            temperature: 0.7,
            top_p: 1.0,
            max_tokens: 0,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
        }
    }
}

/// Body of `POST /sessions`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    /// Agents pre-attached to the session; empty for plain chat sessions
    pub agent_ids: Vec<String>,
    /// Caller-side user identifier the session is scoped to
    pub external_user_id: String,
}

/// Body of a `POST /sessions` response.
///
/// Both levels are optional so a missing identifier can be reported as a
/// protocol error rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    #[serde(default)]
    pub data: Option<SessionData>,
}

/// Payload of a session-creation response.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub id: Option<String>,
}

impl SessionResponse {
    /// Extract the session identifier, if present.
    pub fn session_id(&self) -> Option<&str> {
        self.data.as_ref()?.id.as_deref()
    }
}

/// Body of `POST /sessions/{id}/query`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub endpoint_id: String,
    pub query: String,
    pub agent_ids: Vec<String>,
    pub response_mode: ResponseMode,
    pub reasoning_mode: String,
    pub model_configs: ModelConfigs,
}

/// A single event dispatched from a streamed query.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Decoded JSON event payload
    Json(Value),
    /// Payload that was not valid JSON, passed through verbatim
    Raw(String),
}

/// Terminal outcome of a streamed query.
///
/// `FinishedEarly` means the `[DONE]` sentinel arrived mid-stream and the
/// source was cancelled; `Finished` means the source itself ended. Both
/// mean the stream completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    /// The source signaled end-of-stream
    Finished,
    /// The `[DONE]` sentinel was decoded before end-of-stream
    FinishedEarly,
}

impl std::fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamStatus::Finished => write!(f, "Stream finished"),
            StreamStatus::FinishedEarly => write!(f, "Stream finished early"),
        }
    }
}
