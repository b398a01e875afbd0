//! Run outcomes and reporting
//!
//! This module provides the per-case outcome record and the aggregate run
//! report the harness prints at the end of a sequence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of running a single named case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseOutcome {
    /// Case name (e.g., "File Upload").
    pub name: String,
    /// Whether the case passed.
    pub passed: bool,
    /// Observed status code, if a response was received.
    pub status: Option<u16>,
    /// Parsed JSON response body, if the case passed and the body parsed.
    pub body: Option<serde_json::Value>,
    /// Error or skip reason, if failed.
    pub error: Option<String>,
    /// True when the case was gated off without dispatching a request.
    #[serde(default)]
    pub skipped: bool,
}

impl CaseOutcome {
    /// Create a passed outcome.
    #[must_use]
    pub fn pass(name: impl Into<String>, status: u16, body: Option<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            status: Some(status),
            body,
            error: None,
            skipped: false,
        }
    }

    /// Create a failed outcome for an unexpected status code.
    #[must_use]
    pub fn fail_with_status(name: impl Into<String>, status: u16, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            status: Some(status),
            body: None,
            error: Some(error.into()),
            skipped: false,
        }
    }

    /// Create a failed outcome for a request that never completed.
    #[must_use]
    pub fn fail(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            status: None,
            body: None,
            error: Some(error.into()),
            skipped: false,
        }
    }

    /// Create a failed outcome for a case gated off before dispatch.
    #[must_use]
    pub fn skip(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            status: None,
            body: None,
            error: Some(reason.into()),
            skipped: true,
        }
    }
}

/// Aggregate results from a full harness run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique identifier of the run.
    pub id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Number of cases dispatched (skipped cases excluded).
    pub tests_run: u32,
    /// Number of dispatched cases that passed.
    pub tests_passed: u32,
    /// Upload id captured during the run, if any.
    pub upload_id: Option<String>,
    /// Ordered outcomes of every case, including skipped ones.
    pub outcomes: Vec<CaseOutcome>,
}

impl RunReport {
    /// Create a new report.
    #[must_use]
    pub fn new(
        started_at: DateTime<Utc>,
        tests_run: u32,
        tests_passed: u32,
        upload_id: Option<String>,
        outcomes: Vec<CaseOutcome>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            started_at,
            tests_run,
            tests_passed,
            upload_id,
            outcomes,
        }
    }

    /// Check if every dispatched case passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.tests_passed == self.tests_run
    }

    /// Get pass rate as percentage of dispatched cases.
    #[must_use]
    pub fn pass_rate(&self) -> f64 {
        if self.tests_run == 0 {
            0.0
        } else {
            (f64::from(self.tests_passed) / f64::from(self.tests_run)) * 100.0
        }
    }

    /// Outcomes that were gated off without dispatching.
    pub fn skipped(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| o.skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_outcome_constructors() {
        let pass = CaseOutcome::pass("Homepage Load", 200, None);
        assert!(pass.passed);
        assert_eq!(pass.status, Some(200));
        assert!(!pass.skipped);

        let fail = CaseOutcome::fail_with_status("List Uploads", 500, "expected = 200, got 500");
        assert!(!fail.passed);
        assert_eq!(fail.status, Some(500));

        let timed_out = CaseOutcome::fail("File Upload", "request timed out after 30000 ms");
        assert!(!timed_out.passed);
        assert_eq!(timed_out.status, None);

        let skip = CaseOutcome::skip("Pipeline Scan Step", "no upload id available");
        assert!(!skip.passed);
        assert!(skip.skipped);
    }

    #[test]
    fn test_report_tallies() {
        let outcomes = vec![
            CaseOutcome::pass("a", 200, None),
            CaseOutcome::fail_with_status("b", 500, "boom"),
            CaseOutcome::skip("c", "no upload id available"),
        ];
        let report = RunReport::new(Utc::now(), 2, 1, None, outcomes);

        assert!(!report.all_passed());
        assert_eq!(report.pass_rate(), 50.0);
        assert_eq!(report.skipped().count(), 1);
    }

    #[test]
    fn test_report_all_passed() {
        let report = RunReport::new(Utc::now(), 3, 3, Some("u-1".to_string()), vec![]);
        assert!(report.all_passed());
        assert_eq!(report.pass_rate(), 100.0);
    }

    #[test]
    fn test_empty_run_pass_rate() {
        let report = RunReport::new(Utc::now(), 0, 0, None, vec![]);
        assert_eq!(report.pass_rate(), 0.0);
        assert!(report.all_passed());
    }
}
