//! Run configuration
//!
//! Holds the knobs of a harness run: target base URL, per-request timeout,
//! and the pause inserted between consecutive cases.

use std::time::Duration;

use url::Url;

use soundcheck_domain::{DomainError, DomainResult};

pub use soundcheck_domain::DEFAULT_TIMEOUT;

/// Default target, matching the service's local dev setup.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default pause between consecutive cases (rate limiting against the
/// target service).
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(500);

/// Configuration for a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Base URL of the Sound Analyzer service under test.
    pub base_url: Url,
    /// Timeout bounding each HTTP call.
    pub timeout: Duration,
    /// Pause between consecutive cases.
    pub pause: Duration,
}

impl RunConfig {
    /// Creates a configuration targeting the given base URL.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            pause: DEFAULT_PAUSE,
        }
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the inter-case pause.
    #[must_use]
    pub const fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Joins a relative endpoint (optionally carrying a query string) onto
    /// the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] when the endpoint cannot be
    /// joined onto the base.
    pub fn join_endpoint(&self, endpoint: &str) -> DomainResult<Url> {
        self.base_url
            .join(endpoint)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {endpoint}")))
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.pause, Duration::from_millis(500));
    }

    #[test]
    fn test_join_endpoint() {
        let config = RunConfig::default();
        assert_eq!(
            config.join_endpoint("api/uploads").unwrap().as_str(),
            "http://localhost:3000/api/uploads"
        );
        assert_eq!(
            config.join_endpoint("").unwrap().as_str(),
            "http://localhost:3000/"
        );
    }

    #[test]
    fn test_join_endpoint_with_query() {
        let config = RunConfig::default();
        let url = config.join_endpoint("api/uploads?uploadId=abc-123").unwrap();
        assert_eq!(url.path(), "/api/uploads");
        assert_eq!(url.query(), Some("uploadId=abc-123"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = RunConfig::default()
            .with_timeout(Duration::from_secs(5))
            .with_pause(Duration::ZERO);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.pause, Duration::ZERO);
    }
}
