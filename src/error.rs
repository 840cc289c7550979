//! Application error types using thiserror
//!
//! Error hierarchy:
//! - SolutionError: Issues with the root solution descriptor (fatal)
//! - ProjectError: Issues with a single member project (isolated per project)
//! - DeclarationError: Issues with a single dependency declaration (isolated)
//! - OutputError: Issues writing the generated props files (fatal)
//! - MigrationError: Top-level run failures, including cancellation

use std::path::PathBuf;
use thiserror::Error;

use crate::orchestrator::Phase;

/// Run-level error type
#[derive(Error, Debug)]
pub enum MigrationError {
    /// Solution descriptor related errors
    #[error(transparent)]
    Solution(#[from] SolutionError),

    /// Output file related errors
    #[error(transparent)]
    Output(#[from] OutputError),

    /// The run deadline elapsed before the named phase could finish
    #[error("run cancelled during {phase}: timeout elapsed")]
    Cancelled { phase: Phase },
}

/// Errors related to the root solution descriptor
#[derive(Error, Debug)]
pub enum SolutionError {
    /// The given path does not name a solution file
    #[error("not a solution file (expected a .sln path): {path}")]
    NotASolution { path: PathBuf },

    /// Solution file not found
    #[error("solution file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read the solution file
    #[error("failed to read solution file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but carries no solution format header
    #[error("missing solution format header in {path}")]
    MissingHeader { path: PathBuf },
}

/// Errors related to a single member project
#[derive(Error, Debug)]
pub enum ProjectError {
    /// Project file listed in the solution but absent on disk
    #[error("project file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read the project file
    #[error("failed to read project file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Project file content is not parseable XML
    #[error("failed to parse project file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Failed to write the stripped project file back
    #[error("failed to rewrite project file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reasons a single dependency declaration produced no record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    /// Declaration carries no name attribute
    #[error("declaration has no Include attribute")]
    MissingName,

    /// Declaration carries a name but no version attribute
    #[error("declaration '{name}' has no Version attribute")]
    MissingVersion { name: String },

    /// Version attribute present but not a dotted numeric version
    #[error("declaration '{name}' has unparsable version '{value}'")]
    InvalidVersion { name: String, value: String },
}

/// Errors related to the generated output files
#[derive(Error, Debug)]
pub enum OutputError {
    /// Failed to delete a stale output file
    #[error("failed to delete stale output {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create an output file
    #[error("failed to create output {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MigrationError {
    /// Creates a new Cancelled error for the given phase
    pub fn cancelled(phase: Phase) -> Self {
        MigrationError::Cancelled { phase }
    }
}

impl SolutionError {
    /// Creates a new NotASolution error
    pub fn not_a_solution(path: impl Into<PathBuf>) -> Self {
        SolutionError::NotASolution { path: path.into() }
    }

    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        SolutionError::NotFound { path: path.into() }
    }

    /// Creates a new Unreadable error
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SolutionError::Unreadable {
            path: path.into(),
            source,
        }
    }

    /// Creates a new MissingHeader error
    pub fn missing_header(path: impl Into<PathBuf>) -> Self {
        SolutionError::MissingHeader { path: path.into() }
    }
}

impl ProjectError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ProjectError::NotFound { path: path.into() }
    }

    /// Creates a new Read error
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProjectError::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Parse error
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ProjectError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new Write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProjectError::Write {
            path: path.into(),
            source,
        }
    }
}

impl DeclarationError {
    /// Creates a new MissingVersion error
    pub fn missing_version(name: impl Into<String>) -> Self {
        DeclarationError::MissingVersion { name: name.into() }
    }

    /// Creates a new InvalidVersion error
    pub fn invalid_version(name: impl Into<String>, value: impl Into<String>) -> Self {
        DeclarationError::InvalidVersion {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl OutputError {
    /// Creates a new Remove error
    pub fn remove(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OutputError::Remove {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Create error
    pub fn create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OutputError::Create {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_error(message: &str) -> std::io::Error {
        std::io::Error::other(message.to_string())
    }

    #[test]
    fn test_solution_error_not_a_solution() {
        let err = SolutionError::not_a_solution("/src/app.csproj");
        let msg = format!("{}", err);
        assert!(msg.contains("not a solution file"));
        assert!(msg.contains("app.csproj"));
    }

    #[test]
    fn test_solution_error_not_found() {
        let err = SolutionError::not_found("/src/app.sln");
        let msg = format!("{}", err);
        assert!(msg.contains("solution file not found"));
        assert!(msg.contains("app.sln"));
    }

    #[test]
    fn test_solution_error_unreadable() {
        let err = SolutionError::unreadable("/src/app.sln", io_error("permission denied"));
        let msg = format!("{}", err);
        assert!(msg.contains("failed to read solution file"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_solution_error_missing_header() {
        let err = SolutionError::missing_header("/src/app.sln");
        let msg = format!("{}", err);
        assert!(msg.contains("missing solution format header"));
    }

    #[test]
    fn test_project_error_not_found() {
        let err = ProjectError::not_found("/src/Lib/Lib.csproj");
        let msg = format!("{}", err);
        assert!(msg.contains("project file not found"));
        assert!(msg.contains("Lib.csproj"));
    }

    #[test]
    fn test_project_error_parse() {
        let err = ProjectError::parse("/src/Lib/Lib.csproj", "unexpected end of file");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse project file"));
        assert!(msg.contains("unexpected end of file"));
    }

    #[test]
    fn test_project_error_write() {
        let err = ProjectError::write("/src/Lib/Lib.csproj", io_error("read-only filesystem"));
        let msg = format!("{}", err);
        assert!(msg.contains("failed to rewrite project file"));
        assert!(msg.contains("read-only filesystem"));
    }

    #[test]
    fn test_declaration_error_missing_name() {
        let msg = format!("{}", DeclarationError::MissingName);
        assert!(msg.contains("no Include attribute"));
    }

    #[test]
    fn test_declaration_error_missing_version() {
        let err = DeclarationError::missing_version("Newtonsoft.Json");
        let msg = format!("{}", err);
        assert!(msg.contains("Newtonsoft.Json"));
        assert!(msg.contains("no Version attribute"));
    }

    #[test]
    fn test_declaration_error_invalid_version() {
        let err = DeclarationError::invalid_version("Serilog", "1.0.0-beta");
        let msg = format!("{}", err);
        assert!(msg.contains("Serilog"));
        assert!(msg.contains("1.0.0-beta"));
    }

    #[test]
    fn test_output_error_remove() {
        let err = OutputError::remove("/src/Directory.Packages.props", io_error("busy"));
        let msg = format!("{}", err);
        assert!(msg.contains("failed to delete stale output"));
        assert!(msg.contains("Directory.Packages.props"));
    }

    #[test]
    fn test_output_error_create() {
        let err = OutputError::create("/src/Directory.Build.props", io_error("disk full"));
        let msg = format!("{}", err);
        assert!(msg.contains("failed to create output"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn test_migration_error_from_solution_error() {
        let err: MigrationError = SolutionError::not_found("/src/app.sln").into();
        let msg = format!("{}", err);
        assert!(msg.contains("solution file not found"));
    }

    #[test]
    fn test_migration_error_from_output_error() {
        let err: MigrationError = OutputError::create("/x", io_error("nope")).into();
        let msg = format!("{}", err);
        assert!(msg.contains("failed to create output"));
    }

    #[test]
    fn test_migration_error_cancelled() {
        let err = MigrationError::cancelled(Phase::Aggregating);
        let msg = format!("{}", err);
        assert!(msg.contains("cancelled"));
        assert!(msg.contains("package aggregation"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = SolutionError::not_found("/test.sln");
        let debug = format!("{:?}", err);
        assert!(debug.contains("NotFound"));
    }
}
