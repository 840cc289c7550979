//! Migration orchestration
//!
//! Drives one run through its fixed phase order:
//!
//! 1. Validate the solution path
//! 2. Enumerate member projects
//! 3. Aggregate packages concurrently (projects are stripped as a side effect)
//! 4. Clear stale outputs
//! 5. Write the build configuration
//! 6. Write the version manifest
//!
//! Cancellation is checked between phases and inside the aggregation loop.
//! Any fatal error halts the remaining phases where it happened; outputs
//! written by earlier phases are left behind.

use std::fmt;
use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::aggregate::{aggregate, AggregateOutcome};
use crate::cli::CliArgs;
use crate::domain::MigrationReport;
use crate::error::MigrationError;
use crate::progress::Progress;
use crate::props;
use crate::solution::SolutionFile;

/// Sequential phases of one migration run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ValidatingInput,
    Enumerating,
    Aggregating,
    ClearingOutputs,
    WritingBuildConfig,
    WritingManifest,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::ValidatingInput => "input validation",
            Phase::Enumerating => "project enumeration",
            Phase::Aggregating => "package aggregation",
            Phase::ClearingOutputs => "output clearing",
            Phase::WritingBuildConfig => "build configuration write",
            Phase::WritingManifest => "manifest write",
        };
        write!(f, "{}", name)
    }
}

/// Runs migrations against one solution
pub struct Migrator {
    args: CliArgs,
}

impl Migrator {
    /// Creates a migrator from parsed CLI arguments
    pub fn new(args: CliArgs) -> Self {
        Self { args }
    }

    /// Runs the full migration and reports what happened
    pub async fn run(&self, cancel: &CancellationToken) -> Result<MigrationReport, MigrationError> {
        let mut progress = Progress::new(!self.args.verbose);
        let solution_path = self.args.solution_path();

        self.checkpoint(Phase::ValidatingInput, cancel)?;
        SolutionFile::validate(&solution_path)?;

        self.checkpoint(Phase::Enumerating, cancel)?;
        progress.spinner("Enumerating projects");
        debug!("loading solution {}", solution_path.display());
        let solution = SolutionFile::parse(&solution_path)?;
        progress.finish_and_clear();
        debug!(
            "solution lists {} entries, {} buildable",
            solution.projects.len(),
            solution.buildable_projects().count()
        );

        self.checkpoint(Phase::Aggregating, cancel)?;
        let outcome =
            aggregate(&solution.projects, self.args.resolve, cancel, &mut progress).await?;
        progress.finish_and_clear();

        let output_dir = solution_dir(&solution_path);
        self.checkpoint(Phase::ClearingOutputs, cancel)?;
        props::clear_outputs(&output_dir)?;

        self.checkpoint(Phase::WritingBuildConfig, cancel)?;
        props::write_build_props(&output_dir)?;

        self.checkpoint(Phase::WritingManifest, cancel)?;
        props::write_packages_props(&output_dir, &outcome.records())?;

        Ok(self.report(&solution, &outcome))
    }

    /// Refuses to enter `phase` once the run has been cancelled
    fn checkpoint(&self, phase: Phase, cancel: &CancellationToken) -> Result<(), MigrationError> {
        if cancel.is_cancelled() {
            return Err(MigrationError::cancelled(phase));
        }
        debug!("entering {}", phase);
        Ok(())
    }

    fn report(&self, solution: &SolutionFile, outcome: &AggregateOutcome) -> MigrationReport {
        let mut report = MigrationReport::new(&solution.path, self.args.resolve);
        report.projects_total = solution.projects.len();
        report.projects_scanned = outcome.scanned;
        report.projects_skipped = outcome.skipped_projects;
        report.projects_failed = outcome.failed;
        report.declarations_seen = outcome.declarations_seen;
        report.declarations_skipped = outcome.declarations_skipped;
        report.packages_resolved = outcome.resolved_count();
        report
    }
}

/// Directory the generated outputs belong in
fn solution_dir(solution_path: &Path) -> PathBuf {
    solution_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
