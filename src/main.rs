//! depcentral - central package version migration for MSBuild solutions
//!
//! Scans every project of a solution, lifts the pinned package versions out
//! of the project files, and writes them into a single shared
//! Directory.Packages.props manifest.

use clap::Parser;
use depcentral::cli::CliArgs;
use depcentral::orchestrator::Migrator;
use depcentral::output::ReportFormatter;
use std::io::{self, Write};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; verbose mode opens the debug firehose, otherwise only
/// errors get through
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::ERROR
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("depcentral v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Solution: {}", args.solution_path().display());
        eprintln!("Policy: {}", args.resolve.label());
    }

    // Arm the whole-run deadline; firing it cancels the run between phases
    let cancel = CancellationToken::new();
    let deadline = cancel.clone();
    let timeout = args.timeout;
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        deadline.cancel();
    });

    let migrator = Migrator::new(args.clone());
    let report = migrator.run(&cancel).await?;

    let mut stdout = io::stdout().lock();
    ReportFormatter::new().format(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
