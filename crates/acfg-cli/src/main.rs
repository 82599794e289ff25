//! # acfg CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use acfg_cli::configuration::{run_create_configuration, CreateConfigurationArgs};

/// Static validation ruleset generator.
#[derive(Parser, Debug)]
#[command(name = "acfg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a static configuration file for the response asserter.
    ///
    /// A static configuration lets a client pin the operation types,
    /// statuses and errors a server supports, so that it errors when a
    /// server update introduces new ones instead of silently accepting them.
    #[command(name = "create:configuration")]
    CreateConfiguration(CreateConfigurationArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "acfg starting");

    let result = match cli.command {
        Commands::CreateConfiguration(args) => run_create_configuration(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
