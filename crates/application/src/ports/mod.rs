//! Ports (interfaces) implemented by the infrastructure layer.

pub mod http_client;

pub use http_client::{HttpClient, HttpClientError};
