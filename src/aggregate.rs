//! Concurrent package aggregation
//!
//! Fans out one blocking worker per solution entry, merges every record into
//! a shared table through an atomic per-name upsert, and watches for
//! cancellation between completions. Workers already inside a file are never
//! interrupted; cancellation stops the merge loop and abandons the rest.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::{ConflictPolicy, PackageRecord};
use crate::error::{MigrationError, ProjectError};
use crate::orchestrator::Phase;
use crate::progress::Progress;
use crate::project::extract;
use crate::solution::SolutionProject;

/// Shared name-to-record table built during a run
pub type ResolvedTable = DashMap<String, PackageRecord>;

/// Statistics one worker brings back
#[derive(Debug)]
struct ScanStats {
    path: PathBuf,
    declarations_seen: usize,
    declarations_skipped: usize,
}

/// What one aggregation pass produced
#[derive(Debug)]
pub struct AggregateOutcome {
    /// Resolved table with one entry per distinct package name
    pub table: Arc<ResolvedTable>,
    /// Buildable projects scanned and rewritten successfully
    pub scanned: usize,
    /// Entries skipped because their kind is not buildable
    pub skipped_projects: usize,
    /// Buildable projects dropped after an isolated failure
    pub failed: usize,
    /// Declarations encountered across all scanned projects
    pub declarations_seen: usize,
    /// Declarations dropped as malformed
    pub declarations_skipped: usize,
}

impl AggregateOutcome {
    /// Resolved records, in no particular order
    pub fn records(&self) -> Vec<PackageRecord> {
        self.table.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of distinct packages resolved
    pub fn resolved_count(&self) -> usize {
        self.table.len()
    }
}

/// Scans every solution entry concurrently and merges the results
///
/// One unit of work is launched per entry up front; nothing caps the fan-out
/// below the entry count. Per-project failures are logged and counted, never
/// propagated.
pub async fn aggregate(
    projects: &[SolutionProject],
    policy: ConflictPolicy,
    cancel: &CancellationToken,
    progress: &mut Progress,
) -> Result<AggregateOutcome, MigrationError> {
    let table: Arc<ResolvedTable> = Arc::new(DashMap::new());
    let mut workers: JoinSet<Result<Option<ScanStats>, ProjectError>> = JoinSet::new();

    for project in projects {
        let project = project.clone();
        let table = Arc::clone(&table);
        workers.spawn_blocking(move || scan_project(&project, policy, &table));
    }

    progress.start(projects.len() as u64, "Scanning projects");

    let mut scanned = 0;
    let mut skipped_projects = 0;
    let mut failed = 0;
    let mut declarations_seen = 0;
    let mut declarations_skipped = 0;

    loop {
        tokio::select! {
            // checked first so a fired deadline always halts the merge loop
            biased;
            _ = cancel.cancelled() => {
                workers.abort_all();
                return Err(MigrationError::cancelled(Phase::Aggregating));
            }
            joined = workers.join_next() => {
                let Some(joined) = joined else { break };
                progress.inc();
                match joined {
                    Ok(Ok(Some(stats))) => {
                        scanned += 1;
                        declarations_seen += stats.declarations_seen;
                        declarations_skipped += stats.declarations_skipped;
                        if let Some(name) = stats.path.file_name() {
                            progress.set_message(&name.to_string_lossy());
                        }
                    }
                    Ok(Ok(None)) => skipped_projects += 1,
                    Ok(Err(error)) => {
                        failed += 1;
                        warn!("project dropped: {error}");
                    }
                    Err(join_error) => {
                        failed += 1;
                        warn!("project worker failed: {join_error}");
                    }
                }
            }
        }
    }

    debug!(
        "aggregation complete: {} scanned, {} skipped, {} failed, {} packages",
        scanned,
        skipped_projects,
        failed,
        table.len()
    );
    Ok(AggregateOutcome {
        table,
        scanned,
        skipped_projects,
        failed,
        declarations_seen,
        declarations_skipped,
    })
}

/// Blocking worker body: scans one entry and merges its records
fn scan_project(
    project: &SolutionProject,
    policy: ConflictPolicy,
    table: &ResolvedTable,
) -> Result<Option<ScanStats>, ProjectError> {
    if !project.is_buildable() {
        debug!("skipping non-buildable entry {}", project.name);
        return Ok(None);
    }

    let scan = extract(&project.path)?;
    let stats = ScanStats {
        path: project.path.clone(),
        declarations_seen: scan.declarations_seen,
        declarations_skipped: scan.skipped.len(),
    };
    for record in scan.records {
        upsert(table, policy, record);
    }
    Ok(Some(stats))
}

/// Merges one record into the table under the given policy
///
/// The entry guard holds the shard lock across the compare and the write,
/// so two workers racing on the same name cannot lose an update. Names are
/// compared exactly; ties keep the earlier record.
pub fn upsert(table: &ResolvedTable, policy: ConflictPolicy, record: PackageRecord) {
    match table.entry(record.name.clone()) {
        Entry::Occupied(mut slot) => {
            if policy.replaces(slot.get(), &record) {
                slot.insert(record);
            }
        }
        Entry::Vacant(slot) => {
            slot.insert(record);
        }
    }
}
