//! HTTP Client port
//!
//! This trait abstracts the HTTP client implementation, allowing the
//! application layer to be independent of specific HTTP libraries.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use soundcheck_domain::{RequestSpec, ResponseSpec};

/// Errors surfaced by an HTTP client implementation.
///
/// The harness treats every variant the same way (the case fails and the run
/// continues); the taxonomy exists so the run log says what actually
/// happened.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpClientError {
    /// The request did not complete within its timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Timeout that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be assembled.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Any other transport-level failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues, timeout,
    /// or other transport-level problems. A response with an unexpected
    /// status code is NOT an error at this level.
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>>;
}
