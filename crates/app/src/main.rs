//! Soundcheck - Main Entry Point
//!
//! CLI harness that runs the fixed Sound Analyzer check sequence against a
//! configurable target and exits 0 iff every dispatched case passed.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use soundcheck_application::{DEFAULT_BASE_URL, RunConfig, Scenario};
use soundcheck_domain::RunReport;
use soundcheck_infrastructure::ReqwestHttpClient;

/// Smoke-test harness for the Sound Analyzer HTTP API.
#[derive(Debug, Parser)]
#[command(name = "soundcheck", version, about)]
struct Cli {
    /// Base URL of the Sound Analyzer service under test.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: Url,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Pause between consecutive cases in milliseconds.
    #[arg(long, default_value_t = 500)]
    pause_ms: u64,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig::new(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_pause(Duration::from_millis(self.pause_ms))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let client = match ReqwestHttpClient::new() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("could not create HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = Scenario::new(client, cli.run_config()).run_to_completion().await;
    print_summary(&report);

    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Prints the final run summary to stdout.
fn print_summary(report: &RunReport) {
    println!();
    println!("{:=<60}", "");

    for outcome in &report.outcomes {
        let verdict = if outcome.passed {
            "PASS"
        } else if outcome.skipped {
            "SKIP"
        } else {
            "FAIL"
        };

        match (outcome.status, outcome.error.as_deref()) {
            (Some(status), None) => println!("{verdict}  {} ({status})", outcome.name),
            (Some(status), Some(error)) => {
                println!("{verdict}  {} ({status}): {error}", outcome.name);
            }
            (None, Some(error)) => println!("{verdict}  {}: {error}", outcome.name),
            (None, None) => println!("{verdict}  {}", outcome.name),
        }
    }

    println!("{:=<60}", "");
    println!(
        "Results: {}/{} cases passed ({:.1}%)",
        report.tests_passed,
        report.tests_run,
        report.pass_rate()
    );
    if let Some(upload_id) = &report.upload_id {
        println!("Test upload id: {upload_id}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["soundcheck"]);
        assert_eq!(cli.base_url.as_str(), "http://localhost:3000/");
        assert_eq!(cli.timeout_secs, 30);
        assert_eq!(cli.pause_ms, 500);

        let config = cli.run_config();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.pause, Duration::from_millis(500));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "soundcheck",
            "--base-url",
            "http://10.0.0.1:8080",
            "--timeout-secs",
            "5",
            "--pause-ms",
            "0",
        ]);
        assert_eq!(cli.base_url.as_str(), "http://10.0.0.1:8080/");

        let config = cli.run_config();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.pause, Duration::ZERO);
    }
}
