//! Migration run statistics
//!
//! Tracks what one run enumerated, scanned, skipped, and resolved.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConflictPolicy;

/// Summary of one completed migration run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    /// Absolute path of the migrated solution
    pub solution: PathBuf,
    /// Conflict policy the run used
    pub policy: ConflictPolicy,
    /// Projects listed in the solution, buildable or not
    pub projects_total: usize,
    /// Buildable projects scanned and rewritten successfully
    pub projects_scanned: usize,
    /// Entries skipped because their kind is not buildable
    pub projects_skipped: usize,
    /// Buildable projects dropped after an isolated failure
    pub projects_failed: usize,
    /// Dependency declarations encountered across all scanned projects
    pub declarations_seen: usize,
    /// Declarations dropped as malformed
    pub declarations_skipped: usize,
    /// Distinct package names written to the manifest
    pub packages_resolved: usize,
}

impl MigrationReport {
    /// Creates an empty report for a run against the given solution
    pub fn new(solution: impl Into<PathBuf>, policy: ConflictPolicy) -> Self {
        MigrationReport {
            solution: solution.into(),
            policy,
            projects_total: 0,
            projects_scanned: 0,
            projects_skipped: 0,
            projects_failed: 0,
            declarations_seen: 0,
            declarations_skipped: 0,
            packages_resolved: 0,
        }
    }

    /// Directory containing the generated output files
    pub fn output_dir(&self) -> PathBuf {
        self.solution
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Returns true if any buildable project was dropped
    pub fn has_failures(&self) -> bool {
        self.projects_failed > 0
    }

    /// Returns true if any declaration was dropped as malformed
    pub fn has_skipped_declarations(&self) -> bool {
        self.declarations_skipped > 0
    }
}
