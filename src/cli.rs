//! CLI argument parsing module for depcentral

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::ConflictPolicy;

/// Parse a timeout string in format: Ns (seconds), Nm (minutes), Nh (hours)
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty timeout string".to_string());
    }

    let (num_str, unit) = if let Some(n) = s.strip_suffix('s') {
        (n, 's')
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 'm')
    } else if let Some(n) = s.strip_suffix('h') {
        (n, 'h')
    } else {
        return Err(format!("invalid timeout format: {}", s));
    };

    let num: u64 = num_str
        .parse()
        .map_err(|_| format!("invalid number in timeout: {}", num_str))?;

    let seconds = match unit {
        's' => num,
        'm' => num * 60,
        'h' => num * 60 * 60,
        _ => unreachable!(),
    };

    Ok(Duration::from_secs(seconds))
}

/// Parse the conflict policy name, case-insensitively
///
/// Only `max` and `min` are accepted here; the keep-first fallback exists in
/// the library but is not reachable from the command line.
fn parse_policy(s: &str) -> Result<ConflictPolicy, String> {
    match s.to_ascii_lowercase().as_str() {
        "max" => Ok(ConflictPolicy::Max),
        "min" => Ok(ConflictPolicy::Min),
        _ => Err(format!("invalid resolve policy '{}': expected 'max' or 'min'", s)),
    }
}

/// Central package version migrator for MSBuild solutions
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depcentral",
    version,
    about = "Moves per-project package versions into Directory.Packages.props"
)]
pub struct CliArgs {
    /// Path of the solution file (.sln) to migrate
    #[arg(short = 'p', long = "project")]
    pub project: PathBuf,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// How to pick a version when projects disagree: max or min
    #[arg(short = 'r', long = "resolve", default_value = "max", value_parser = parse_policy)]
    pub resolve: ConflictPolicy,

    /// Whole-run timeout (e.g. 90s, 30m, 2h)
    #[arg(short = 't', long, default_value = "30m", value_parser = parse_timeout)]
    pub timeout: Duration,
}

impl CliArgs {
    /// The solution path made absolute against the current directory
    pub fn solution_path(&self) -> PathBuf {
        std::path::absolute(&self.project).unwrap_or_else(|_| self.project.clone())
    }
}
