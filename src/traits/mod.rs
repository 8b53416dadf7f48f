//! Trait abstractions for dependency injection.
//!
//! These traits decouple the API client from concrete transports so the
//! streaming decode loop can be exercised in tests without a network.

pub mod http;

pub use http::{Headers, HttpClient, HttpError, Response};
