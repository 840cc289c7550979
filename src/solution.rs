//! Solution descriptor parsing
//!
//! Enumerates the member projects of a Visual Studio solution file:
//! - Validates the path shape and the solution format header
//! - Extracts one entry per `Project(...)` line, in declaration order
//! - Classifies entries by project-type GUID, falling back to the extension
//! - Normalizes backslash separators and resolves paths against the solution

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::SolutionError;

/// Header every solution file begins with, allowing for a BOM and comments
const FORMAT_HEADER: &str = "Microsoft Visual Studio Solution File, Format Version";

/// How many leading lines may precede the format header
const HEADER_SEARCH_LINES: usize = 4;

/// Project-type GUIDs known to identify buildable MSBuild projects
const MSBUILD_TYPE_GUIDS: &[&str] = &[
    "FAE04EC0-301F-11D3-BF4B-00C04F79EFBC", // C#
    "9A19103F-16F7-4668-BE54-9A1E7A4F7556", // C# (SDK style)
    "F184B08F-C81C-45F6-A57F-5ABD9991F28F", // Visual Basic
    "778DAE3C-4631-46EA-AA77-85C1314464D9", // Visual Basic (SDK style)
    "F2A71F9B-5D33-465A-A702-920D77279786", // F#
    "6EC3EE1D-3C4E-46DD-8F32-0CC8E7565705", // F# (SDK style)
    "8BC9CEB8-8B4A-11D0-8D11-00A0C91BC942", // C++
];

/// Project-type GUID of a solution folder (a grouping node, not a project)
const SOLUTION_FOLDER_GUID: &str = "2150E333-8FDC-42A3-9474-1A3956D46DE8";

// Project("{type-guid}") = "Name", "relative\path", "{project-guid}"
static PROJECT_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^Project\("\{([0-9A-Fa-f-]+)\}"\)\s*=\s*"([^"]*)"\s*,\s*"([^"]*)"\s*,\s*"\{([0-9A-Fa-f-]+)\}""#,
    )
    .unwrap()
});

/// What kind of entry a solution line declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectKind {
    /// A buildable MSBuild project that may declare dependencies
    MsBuild,
    /// A solution folder grouping node with no file behind it
    SolutionFolder,
    /// An entry of unrecognized type, never scanned
    Unknown,
}

/// One entry listed in a solution file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionProject {
    /// Display name from the solution line
    pub name: String,
    /// Absolute path of the project file
    pub path: PathBuf,
    /// Classification from the project-type GUID
    pub kind: ProjectKind,
}

impl SolutionProject {
    /// Returns true when this entry points at a scannable project file
    pub fn is_buildable(&self) -> bool {
        self.kind == ProjectKind::MsBuild
    }
}

/// A parsed solution descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionFile {
    /// Path the solution was loaded from
    pub path: PathBuf,
    /// Member projects in declaration order
    pub projects: Vec<SolutionProject>,
}

impl SolutionFile {
    /// Checks the path names an existing `.sln` file without reading it
    pub fn validate(path: &Path) -> Result<(), SolutionError> {
        let is_sln = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("sln"));
        if !is_sln {
            return Err(SolutionError::not_a_solution(path));
        }
        if !path.exists() {
            return Err(SolutionError::not_found(path));
        }
        Ok(())
    }

    /// Loads and parses the solution at `path`
    pub fn parse(path: &Path) -> Result<Self, SolutionError> {
        Self::validate(path)?;
        let content =
            fs::read_to_string(path).map_err(|source| SolutionError::unreadable(path, source))?;
        Self::from_content(path, &content)
    }

    /// Parses solution text that was loaded from `path`
    pub fn from_content(path: &Path, content: &str) -> Result<Self, SolutionError> {
        let has_header = content
            .lines()
            .take(HEADER_SEARCH_LINES)
            .any(|line| line.trim_start_matches('\u{feff}').trim().starts_with(FORMAT_HEADER));
        if !has_header {
            return Err(SolutionError::missing_header(path));
        }

        let solution_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let mut projects = Vec::new();
        for line in content.lines() {
            let Some(caps) = PROJECT_LINE_RE.captures(line.trim()) else {
                continue;
            };
            let type_guid = caps[1].to_ascii_uppercase();
            let relative = caps[3].replace('\\', "/");
            projects.push(SolutionProject {
                name: caps[2].to_string(),
                path: solution_dir.join(&relative),
                kind: classify(&type_guid, &relative),
            });
        }

        Ok(SolutionFile {
            path: path.to_path_buf(),
            projects,
        })
    }

    /// Iterates the entries that are actual buildable projects
    pub fn buildable_projects(&self) -> impl Iterator<Item = &SolutionProject> {
        self.projects.iter().filter(|p| p.is_buildable())
    }
}

/// Classifies one entry from its type GUID, falling back to the path extension
///
/// Unlisted GUIDs with a `*proj` extension still count as MSBuild projects so
/// that newer project types are not silently dropped.
fn classify(type_guid: &str, relative_path: &str) -> ProjectKind {
    if type_guid == SOLUTION_FOLDER_GUID {
        return ProjectKind::SolutionFolder;
    }
    if MSBUILD_TYPE_GUIDS.contains(&type_guid) {
        return ProjectKind::MsBuild;
    }
    let proj_extension = Path::new(relative_path)
        .extension()
        .is_some_and(|ext| ext.to_string_lossy().to_ascii_lowercase().ends_with("proj"));
    if proj_extension {
        ProjectKind::MsBuild
    } else {
        ProjectKind::Unknown
    }
}
