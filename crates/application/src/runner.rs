//! Case runner
//!
//! Executes one named case at a time: build the full URL, dispatch the
//! request through the HTTP client port, compare the observed status against
//! the expectation, and update the run tallies.

use std::sync::Arc;

use tracing::{debug, info, warn};

use soundcheck_domain::{
    CaseOutcome, HttpMethod, RequestBody, RequestSpec, StatusExpectation, extract_upload_id,
};

use crate::config::RunConfig;
use crate::ports::HttpClient;

/// Mutable tallies of a run.
///
/// The upload id has single-writer semantics: the first successful
/// upload-creating call sets it, later cases only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    /// Cases dispatched so far (skipped cases excluded).
    pub tests_run: u32,
    /// Dispatched cases that passed.
    pub tests_passed: u32,
    /// Upload id captured during the run.
    pub upload_id: Option<String>,
}

/// Runs individual cases against the configured target.
///
/// A case passes iff the observed status code matches the caller-supplied
/// expectation. Transport failures (timeout, refused connection) become
/// failed outcomes; nothing here panics or aborts the run.
pub struct CaseRunner<C: HttpClient> {
    client: Arc<C>,
    config: RunConfig,
    state: RunState,
}

impl<C: HttpClient> CaseRunner<C> {
    /// Creates a runner over the given client and configuration.
    #[must_use]
    pub fn new(client: Arc<C>, config: RunConfig) -> Self {
        Self {
            client,
            config,
            state: RunState::default(),
        }
    }

    /// Returns the run configuration.
    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Returns the current run tallies.
    #[must_use]
    pub const fn state(&self) -> &RunState {
        &self.state
    }

    /// Returns the captured upload id, if any.
    #[must_use]
    pub fn upload_id(&self) -> Option<&str> {
        self.state.upload_id.as_deref()
    }

    /// Consumes the runner, yielding the final tallies.
    #[must_use]
    pub fn into_state(self) -> RunState {
        self.state
    }

    /// Runs a single named case.
    ///
    /// Increments `tests_run` exactly once, regardless of outcome. On a
    /// matching status, increments `tests_passed`, parses the body as JSON
    /// when possible (parse failures are tolerated), and captures the upload
    /// id when the body carries one.
    pub async fn run_case(
        &mut self,
        name: &str,
        method: HttpMethod,
        endpoint: &str,
        expected: &StatusExpectation,
        body: RequestBody,
    ) -> CaseOutcome {
        self.state.tests_run += 1;

        let url = match self.config.join_endpoint(endpoint) {
            Ok(url) => url,
            Err(e) => {
                warn!(case = name, error = %e, "could not build request URL");
                return CaseOutcome::fail(name, e.to_string());
            }
        };

        info!(case = name, "{method} {url}");

        let request = RequestSpec {
            method,
            url: url.into(),
            body,
            timeout: self.config.timeout,
        };

        let response = match self.client.execute(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(case = name, error = %e, "request failed");
                return CaseOutcome::fail(name, e.to_string());
            }
        };

        if expected.matches(response.status) {
            self.state.tests_passed += 1;
            info!(
                case = name,
                status = response.status,
                elapsed = %response.duration_display(),
                "passed"
            );

            let parsed = response.body_as_json();
            if let Some(id) = parsed.as_ref().and_then(extract_upload_id) {
                info!(case = name, upload_id = %id, "captured upload id");
                self.state.upload_id = Some(id);
            }
            CaseOutcome::pass(name, response.status, parsed)
        } else {
            let error = format!(
                "expected status {}, got {}",
                expected.description(),
                response.status
            );
            warn!(case = name, status = response.status, "{error}");
            debug!(case = name, body = %response.body, "response body");
            CaseOutcome::fail_with_status(name, response.status, error)
        }
    }
}
