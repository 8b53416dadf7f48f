//! Adapter implementations of the trait abstractions.
//!
//! Production adapters live at the top level; test doubles live under
//! [`mock`].

pub mod mock;
pub mod reqwest_http;

pub use reqwest_http::ReqwestHttpClient;
