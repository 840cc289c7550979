//! Text output formatter for the run summary
//!
//! Renders a short human-readable report after a successful run: what was
//! resolved, where the outputs went, and anything that was dropped along
//! the way.

use std::io::Write;

use colored::Colorize;

use crate::domain::MigrationReport;
use crate::props::{BUILD_PROPS_FILE, PACKAGES_PROPS_FILE};

/// Text formatter for the migration summary
pub struct ReportFormatter {
    /// Whether to use colors
    color: bool,
}

impl ReportFormatter {
    /// Create a new formatter with colored output
    pub fn new() -> Self {
        Self { color: true }
    }

    /// Create a new formatter with the color option
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// Write the summary for one completed run
    pub fn format(&self, report: &MigrationReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let packages = count(report.packages_resolved, "package");
        let projects = count(report.projects_scanned, "project");
        let headline = format!(
            "{} centralized from {} (policy: {})",
            packages,
            projects,
            report.policy.label()
        );
        if self.color {
            writeln!(writer, "{} {}", "✓".green().bold(), headline)?;
        } else {
            writeln!(writer, "✓ {}", headline)?;
        }

        let output_dir = report.output_dir();
        writeln!(writer, "  {}", output_dir.join(PACKAGES_PROPS_FILE).display())?;
        writeln!(writer, "  {}", output_dir.join(BUILD_PROPS_FILE).display())?;

        if report.has_failures() {
            let line = format!("{} dropped due to errors", count(report.projects_failed, "project"));
            self.warn(&line, writer)?;
        }
        if report.has_skipped_declarations() {
            let line = format!(
                "{} skipped as malformed",
                count(report.declarations_skipped, "declaration")
            );
            self.warn(&line, writer)?;
        }
        Ok(())
    }

    fn warn(&self, line: &str, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.color {
            writeln!(writer, "{} {}", "⚠".yellow(), line)
        } else {
            writeln!(writer, "⚠ {}", line)
        }
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}
