//! Member project scanning
//!
//! One call per project file: read, scan, strip, write back. Failures here
//! are per-project and never abort the overall run.

mod scan;

pub use scan::{scan_content, ProjectScan, ScanError};

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::ProjectError;

/// Scans `path`, rewrites it in place, and returns what was found
///
/// The rewrite always happens, even when every declaration was already
/// stripped, so a second pass over the same tree is a no-op on content.
pub fn extract(path: &Path) -> Result<ProjectScan, ProjectError> {
    if !path.exists() {
        return Err(ProjectError::not_found(path));
    }

    debug!("scanning project {}", path.display());
    let content = fs::read_to_string(path).map_err(|source| ProjectError::read(path, source))?;
    let scan = scan_content(&content).map_err(|e| ProjectError::parse(path, e.to_string()))?;

    for record in &scan.records {
        debug!("found {} in {}", record, path.display());
    }
    for reason in &scan.skipped {
        warn!("{}: dropped declaration: {}", path.display(), reason);
    }

    fs::write(path, &scan.rewritten).map_err(|source| ProjectError::write(path, source))?;
    debug!("rewrote project {}", path.display());
    Ok(scan)
}
