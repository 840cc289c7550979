//! Version conflict resolution policies

use serde::{Deserialize, Serialize};

use super::PackageRecord;

/// Rule for picking one version when a package is declared by several projects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Keep the greatest declared version
    #[default]
    Max,

    /// Keep the least declared version
    Min,

    /// Keep whichever record was seen first, ignoring versions entirely
    KeepFirst,
}

impl ConflictPolicy {
    /// Short name for display
    pub fn label(&self) -> &'static str {
        match self {
            ConflictPolicy::Max => "max",
            ConflictPolicy::Min => "min",
            ConflictPolicy::KeepFirst => "keep-first",
        }
    }

    /// Returns true when `incoming` should replace `existing`
    ///
    /// Equal versions never replace, so the first record seen wins ties and
    /// its metadata is the metadata that survives.
    pub fn replaces(&self, existing: &PackageRecord, incoming: &PackageRecord) -> bool {
        match self {
            ConflictPolicy::Max => incoming.version > existing.version,
            ConflictPolicy::Min => incoming.version < existing.version,
            ConflictPolicy::KeepFirst => false,
        }
    }

    /// Picks the record to keep out of two candidates for the same name
    pub fn resolve<'a>(
        &self,
        existing: &'a PackageRecord,
        incoming: &'a PackageRecord,
    ) -> &'a PackageRecord {
        if self.replaces(existing, incoming) {
            incoming
        } else {
            existing
        }
    }
}
