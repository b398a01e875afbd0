//! Request specification types
//!
//! A [`RequestSpec`] describes a single HTTP call to make: method, absolute
//! URL, body, and the timeout that bounds it.

pub mod body;
pub mod method;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use body::{FilePart, RequestBody, TextField};
pub use method::HttpMethod;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP request specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method to use.
    pub method: HttpMethod,
    /// Absolute URL of the request.
    pub url: String,
    /// Request body.
    #[serde(default)]
    pub body: RequestBody,
    /// Timeout bounding the whole call.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

const fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl RequestSpec {
    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            body: RequestBody::None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a POST request with a JSON body.
    #[must_use]
    pub fn post_json(url: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            body: RequestBody::json(value),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a POST request with a multipart body.
    #[must_use]
    pub fn post_multipart(url: impl Into<String>, fields: Vec<TextField>, files: Vec<FilePart>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            body: RequestBody::multipart(fields, files),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Delete,
            url: url.into(),
            body: RequestBody::None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
