//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses or errors for testing purposes.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::http::StreamingResponse;
use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: String,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a buffered response
    Success(Response),
    /// Return an error
    Error(HttpError),
    /// Return a streaming response delivering the given chunks
    Stream { status: u16, chunks: Vec<Bytes> },
    /// Return a streaming response that exposes no readable stream
    NoStream { status: u16 },
}

/// Mock HTTP client for testing.
///
/// This client can be configured to return specific responses for URLs,
/// allowing tests to verify HTTP interactions without network access.
///
/// # Example
///
/// ```ignore
/// use ondemand_chat::adapters::mock::{MockHttpClient, MockResponse};
/// use ondemand_chat::traits::{HttpClient, Response, Headers};
/// use bytes::Bytes;
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "https://api.example.com/sessions",
///     MockResponse::Success(Response::new(201, Bytes::from("{}"))),
/// );
///
/// let response = client
///     .post("https://api.example.com/sessions", "{}", &Headers::new())
///     .await?;
/// assert_eq!(response.status, 201);
/// assert_eq!(client.requests().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Configured responses by URL
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a specific URL.
    ///
    /// The URL is matched exactly.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, url: &str, body: &str, headers: &Headers) {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
        });
    }

    fn lookup(&self, url: &str) -> Result<MockResponse, HttpError> {
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| HttpError::Other(format!("no mock response configured for {}", url)))
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record(url, body, headers);

        match self.lookup(url)? {
            MockResponse::Success(response) => Ok(response),
            MockResponse::Error(err) => Err(err),
            MockResponse::Stream { .. } | MockResponse::NoStream { .. } => Err(HttpError::Other(
                "streaming response configured for buffered request".to_string(),
            )),
        }
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<StreamingResponse, HttpError> {
        self.record(url, body, headers);

        match self.lookup(url)? {
            MockResponse::Success(response) => Ok(StreamingResponse {
                status: response.status,
                stream: Some(Box::pin(futures::stream::once(async move {
                    Ok::<_, HttpError>(response.body)
                }))),
            }),
            MockResponse::Error(err) => Err(err),
            MockResponse::Stream { status, chunks } => Ok(StreamingResponse {
                status,
                stream: Some(Box::pin(futures::stream::iter(
                    chunks.into_iter().map(Ok::<_, HttpError>),
                ))),
            }),
            MockResponse::NoStream { status } => Ok(StreamingResponse {
                status,
                stream: None,
            }),
        }
    }
}
