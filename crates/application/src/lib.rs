//! Soundcheck Application - Harness orchestration
//!
//! This crate defines the `HttpClient` port, the run configuration, the
//! per-case runner, and the fixed Sound Analyzer check sequence.

pub mod config;
pub mod fixture;
pub mod ports;
pub mod runner;
pub mod scenario;

pub use config::{DEFAULT_BASE_URL, DEFAULT_PAUSE, DEFAULT_TIMEOUT, RunConfig};
pub use ports::{HttpClient, HttpClientError};
pub use runner::{CaseRunner, RunState};
pub use scenario::Scenario;
