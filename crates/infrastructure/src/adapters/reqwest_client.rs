//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It handles all HTTP communication for the harness.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Url};
use tracing::debug;

use soundcheck_application::ports::{HttpClient, HttpClientError};
use soundcheck_domain::{HttpMethod, RequestBody, RequestSpec, ResponseSpec};

/// HTTP client implementation using reqwest.
///
/// Wraps `reqwest::Client` and implements the `HttpClient` port from the
/// application layer. Timeouts are applied per request from the
/// `RequestSpec`, not on the client.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - User-Agent: "Soundcheck/0.1.0"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent("Soundcheck/0.1.0")
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a new HTTP client wrapping a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Attaches the domain `RequestBody` to the request builder.
    ///
    /// Multipart file parts get their MIME type from the file name, falling
    /// back to `application/octet-stream`.
    fn build_body(
        builder: reqwest::RequestBuilder,
        body: &RequestBody,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        match body {
            RequestBody::None => Ok(builder),

            RequestBody::Json { value } => Ok(builder.json(value)),

            RequestBody::Multipart { fields, files } => {
                let mut form = Form::new();

                for field in fields {
                    form = form.text(field.name.clone(), field.value.clone());
                }

                for file in files {
                    let mime_type = mime_guess::from_path(&file.file_name)
                        .first_or_octet_stream()
                        .to_string();

                    let part = Part::bytes(file.bytes.clone())
                        .file_name(file.file_name.clone())
                        .mime_str(&mime_type)
                        .map_err(|e| {
                            HttpClientError::InvalidBody(format!("invalid MIME type: {e}"))
                        })?;

                    form = form.part(file.name.clone(), part);
                }

                Ok(builder.multipart(form))
            }
        }
    }

    /// Maps reqwest errors to the port's `HttpClientError` taxonomy.
    fn map_error(error: &reqwest::Error, timeout: Duration) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            };
        }

        if error.is_connect() {
            return HttpClientError::ConnectionFailed(error.to_string());
        }

        HttpClientError::Other(error.to_string())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>> {
        // Clone what we need to move into the async block
        let method = request.method;
        let url = request.url.clone();
        let body = request.body.clone();
        let timeout = request.timeout;

        Box::pin(async move {
            let parsed_url =
                Url::parse(&url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))?;

            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(method), parsed_url)
                .timeout(timeout);

            builder = Self::build_body(builder, &body)?;

            debug!(%method, %url, "dispatching request");

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout))?;

            let duration = start.elapsed();
            let status = response.status().as_u16();

            let headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            let body_bytes = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::Other(format!("failed to read body: {e}")))?
                .to_vec();

            debug!(status, bytes = body_bytes.len(), "received response");

            Ok(ResponseSpec::new(status, headers, body_bytes, duration))
        })
    }
}
