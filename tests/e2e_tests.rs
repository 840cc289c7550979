//! End-to-end tests for the depcentral CLI
//!
//! These tests verify:
//! - A real solution tree is migrated end to end through the binary
//! - Exit codes and stderr messages for bad invocations
//! - Policy and verbosity flags behave from the command line

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// SDK-style C# project type GUID
const CSHARP_SDK_GUID: &str = "9A19103F-16F7-4668-BE54-9A1E7A4F7556";

/// Command under test
fn depcentral() -> Command {
    Command::cargo_bin("depcentral").expect("binary should be built")
}

/// Writes one project file with the given package declarations
fn write_project(dir: &Path, file: &str, packages: &[(&str, &str)]) {
    let mut content = String::from("<Project Sdk=\"Microsoft.NET.Sdk\">\n  <ItemGroup>\n");
    for (name, version) in packages {
        content.push_str(&format!(
            "    <PackageReference Include=\"{}\" Version=\"{}\" />\n",
            name, version
        ));
    }
    content.push_str("  </ItemGroup>\n</Project>\n");
    fs::write(dir.join(file), content).unwrap();
}

/// Creates a two-project solution with one version conflict
fn create_test_solution() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    write_project(
        dir.path(),
        "A.csproj",
        &[("Shared.Lib", "1.0.0"), ("Json.Core", "13.0.1")],
    );
    write_project(dir.path(), "B.csproj", &[("Shared.Lib", "2.0.0")]);
    let content = format!(
        "Microsoft Visual Studio Solution File, Format Version 12.00\n\
         Project(\"{{{guid}}}\") = \"A\", \"A.csproj\", \"{{00000001-0000-0000-0000-000000000000}}\"\nEndProject\n\
         Project(\"{{{guid}}}\") = \"B\", \"B.csproj\", \"{{00000002-0000-0000-0000-000000000000}}\"\nEndProject\n",
        guid = CSHARP_SDK_GUID
    );
    let sln = dir.path().join("All.sln");
    fs::write(&sln, content).unwrap();
    (dir, sln)
}

mod migration_tests {
    use super::*;

    /// Test a full migration through the binary
    #[test]
    fn test_migrates_solution_end_to_end() {
        let (dir, sln) = create_test_solution();

        depcentral()
            .arg("-p")
            .arg(&sln)
            .assert()
            .success()
            .stdout(predicate::str::contains("centralized"))
            .stdout(predicate::str::contains("Directory.Packages.props"));

        let manifest = fs::read_to_string(dir.path().join("Directory.Packages.props")).unwrap();
        assert!(manifest.contains("Include=\"Shared.Lib\" Version=\"2.0.0\""));
        assert!(manifest.contains("Include=\"Json.Core\" Version=\"13.0.1\""));
        assert!(dir.path().join("Directory.Build.props").exists());

        let project = fs::read_to_string(dir.path().join("A.csproj")).unwrap();
        assert!(!project.contains("Version="), "project not stripped: {}", project);
    }

    /// Test that the minimum policy flag reaches the resolution logic
    #[test]
    fn test_min_policy_flag() {
        let (dir, sln) = create_test_solution();

        depcentral()
            .arg("-p")
            .arg(&sln)
            .args(["-r", "min"])
            .assert()
            .success()
            .stdout(predicate::str::contains("(policy: min)"));

        let manifest = fs::read_to_string(dir.path().join("Directory.Packages.props")).unwrap();
        assert!(manifest.contains("Include=\"Shared.Lib\" Version=\"1.0.0\""));
    }

    /// Test that missing member projects are reported but do not fail the run
    #[test]
    fn test_missing_project_warns_but_succeeds() {
        let (dir, sln) = create_test_solution();
        fs::remove_file(dir.path().join("B.csproj")).unwrap();

        depcentral()
            .arg("-p")
            .arg(&sln)
            .assert()
            .success()
            .stdout(predicate::str::contains("dropped due to errors"));

        let manifest = fs::read_to_string(dir.path().join("Directory.Packages.props")).unwrap();
        assert!(manifest.contains("Json.Core"));
    }

    /// Test verbose mode output
    #[test]
    fn test_verbose_prints_run_header() {
        let (_dir, sln) = create_test_solution();

        depcentral()
            .arg("-p")
            .arg(&sln)
            .arg("--verbose")
            .assert()
            .success()
            .stderr(predicate::str::contains("depcentral v"))
            .stderr(predicate::str::contains("Policy: max"));
    }
}

mod failure_tests {
    use super::*;

    /// Test that a non-solution path exits 1 with a clear message
    #[test]
    fn test_rejects_wrong_extension() {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let project = dir.path().join("App.csproj");
        fs::write(&project, "<Project></Project>").unwrap();

        depcentral()
            .arg("-p")
            .arg(&project)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("not a solution file"));
    }

    /// Test that a nonexistent solution exits 1
    #[test]
    fn test_rejects_missing_solution() {
        depcentral()
            .args(["-p", "/definitely/not/here/All.sln"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("solution file not found"));
    }

    /// Test that the solution argument is required
    #[test]
    fn test_requires_project_argument() {
        depcentral()
            .assert()
            .failure()
            .stderr(predicate::str::contains("--project"));
    }

    /// Test that unknown policies are rejected at parse time
    #[test]
    fn test_rejects_unknown_policy() {
        depcentral()
            .args(["-p", "All.sln", "-r", "newest"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid resolve policy"));
    }

    /// Test that timeouts without a unit suffix are rejected
    #[test]
    fn test_rejects_bare_timeout_number() {
        depcentral()
            .args(["-p", "All.sln", "-t", "30"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid timeout format"));
    }
}

mod cli_surface_tests {
    use super::*;

    /// Test help output
    #[test]
    fn test_help_describes_the_tool() {
        depcentral()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Moves per-project package versions"));
    }

    /// Test version output
    #[test]
    fn test_version_flag() {
        depcentral()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("depcentral"));
    }
}
