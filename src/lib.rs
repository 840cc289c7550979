//! depcentral - central package version migration library
//!
//! Core functionality for migrating an MSBuild solution from per-project
//! version pinning to central version management:
//! - Solution enumeration (.sln parsing)
//! - Concurrent project scanning and in-place version stripping
//! - Version conflict resolution (max / min / keep-first)
//! - Directory.Build.props and Directory.Packages.props generation

pub mod aggregate;
pub mod cli;
pub mod domain;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod project;
pub mod props;
pub mod solution;
