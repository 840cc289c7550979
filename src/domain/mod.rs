//! Core domain models
//!
//! Defines the vocabulary of a migration run:
//! - DottedVersion: dotted numeric versions with component-wise ordering
//! - PackageRecord: a package name with its chosen version and metadata
//! - ConflictPolicy: how to pick between competing versions
//! - MigrationReport: statistics for one completed run

mod package;
mod policy;
mod report;
mod version;

pub use package::PackageRecord;
pub use policy::ConflictPolicy;
pub use report::MigrationReport;
pub use version::{DottedVersion, VersionParseError};
