//! # create:configuration Subcommand
//!
//! Generates a static validation ruleset from a live server, or with
//! `--check` verifies that an existing one still describes the server.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use acfg_client::{ClientConfig, HttpFetcher};
use acfg_ruleset::CheckOutcome;

/// Arguments for the `acfg create:configuration` subcommand.
#[derive(Args, Debug)]
pub struct CreateConfigurationArgs {
    /// Where to write the ruleset. The parent directory must exist.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Base URL of the server (overrides ACFG_SERVER_URL).
    #[arg(long, value_name = "URL")]
    pub server_url: Option<String>,

    /// Per-request timeout in seconds (overrides ACFG_TIMEOUT_SECS).
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Verify the existing file matches the server instead of writing it.
    #[arg(long)]
    pub check: bool,
}

/// Execute the create:configuration subcommand.
///
/// Returns exit code: 0 on success, 1 if --check finds the file missing or
/// outdated. Operational failures are returned as errors.
pub fn run_create_configuration(args: &CreateConfigurationArgs) -> Result<u8> {
    let config = ClientConfig::resolve(args.server_url.as_deref(), args.timeout_secs)
        .context("invalid client configuration")?;
    tracing::debug!(server_url = %config.server_url, timeout_secs = config.timeout_secs, "resolved configuration");

    let fetcher = HttpFetcher::new(&config).context("failed to build HTTP client")?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    if args.check {
        let outcome = runtime
            .block_on(acfg_ruleset::check(&fetcher, &args.output))
            .with_context(|| format!("failed to check {}", args.output.display()))?;
        return Ok(report(&outcome, args));
    }

    let snapshot = runtime
        .block_on(acfg_ruleset::generate(&fetcher, &args.output))
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    println!(
        "OK: wrote configuration to {} ({})",
        snapshot.path.display(),
        snapshot.fingerprint
    );
    Ok(0)
}

fn report(outcome: &CheckOutcome, args: &CreateConfigurationArgs) -> u8 {
    let path = args.output.display();
    match outcome {
        CheckOutcome::UpToDate { .. } => println!("OK: configuration is up to date"),
        CheckOutcome::Reformatted { fingerprint } => {
            println!("OK: configuration content matches ({fingerprint}) but is not in canonical layout")
        }
        CheckOutcome::Missing => println!("FAIL: configuration does not exist: {path}"),
        CheckOutcome::Outdated { expected, existing } => {
            println!("FAIL: configuration is outdated: {path}");
            println!("  Expected digest: {expected}");
            match existing {
                Some(existing) => println!("  Existing digest: {existing}"),
                None => println!("  Existing file is not valid JSON"),
            }
        }
    }
    if outcome.is_current() {
        return 0;
    }
    tracing::warn!(path = %path, "configuration no longer matches the server");
    1
}
