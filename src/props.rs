//! Generated output files
//!
//! Produces the two files that switch a solution over to central version
//! management:
//! - `Directory.Build.props`: fixed content enabling central management
//! - `Directory.Packages.props`: one `PackageVersion` item per resolved
//!   package, sorted by name so reruns produce identical bytes
//!
//! Stale copies of both files are deleted up front so a failed run can never
//! leave a fresh build config next to an outdated manifest.

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use tracing::{debug, warn};

use crate::domain::PackageRecord;
use crate::error::OutputError;

/// File name of the build-configuration output
pub const BUILD_PROPS_FILE: &str = "Directory.Build.props";

/// File name of the generated version manifest
pub const PACKAGES_PROPS_FILE: &str = "Directory.Packages.props";

/// Build-configuration content, written verbatim
const BUILD_PROPS_TEMPLATE: &str = include_str!("../templates/Directory.Build.props");

/// Deletes stale output files from `dir`, warning for each one removed
pub fn clear_outputs(dir: &Path) -> Result<(), OutputError> {
    for file in [BUILD_PROPS_FILE, PACKAGES_PROPS_FILE] {
        let path = dir.join(file);
        if path.exists() {
            warn!("deleting stale output {}", path.display());
            fs::remove_file(&path).map_err(|source| OutputError::remove(&path, source))?;
        }
    }
    Ok(())
}

/// Writes the fixed build-configuration file into `dir`
pub fn write_build_props(dir: &Path) -> Result<PathBuf, OutputError> {
    let path = dir.join(BUILD_PROPS_FILE);
    debug!("creating {}", path.display());
    fs::write(&path, BUILD_PROPS_TEMPLATE).map_err(|source| OutputError::create(&path, source))?;
    Ok(path)
}

/// Writes the version manifest for `records` into `dir`
pub fn write_packages_props(dir: &Path, records: &[PackageRecord]) -> Result<PathBuf, OutputError> {
    let path = dir.join(PACKAGES_PROPS_FILE);
    debug!("creating {} with {} packages", path.display(), records.len());
    let document = render_packages_props(records);
    fs::write(&path, document).map_err(|source| OutputError::create(&path, source))?;
    Ok(path)
}

/// Renders the manifest document for `records`
///
/// Entries are sorted by package name regardless of input order. Each one
/// carries its name, its version, and then any metadata attributes from the
/// winning declaration, in their original order.
pub fn render_packages_props(records: &[PackageRecord]) -> String {
    try_render(records).expect("in-memory rendering cannot fail")
}

fn try_render(records: &[PackageRecord]) -> Result<String, String> {
    let mut ordered: Vec<&PackageRecord> = records.iter().collect();
    ordered.sort_by(|a, b| a.name.cmp(&b.name));

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    emit(&mut writer, Event::Start(BytesStart::new("Project")))?;
    emit(&mut writer, Event::Start(BytesStart::new("ItemGroup")))?;
    for record in ordered {
        let mut item = BytesStart::new("PackageVersion");
        item.push_attribute(("Include", record.name.as_str()));
        item.push_attribute(("Version", record.version.to_string().as_str()));
        for (key, value) in &record.attributes {
            item.push_attribute((key.as_str(), value.as_str()));
        }
        emit(&mut writer, Event::Empty(item))?;
    }
    emit(&mut writer, Event::End(BytesEnd::new("ItemGroup")))?;
    emit(&mut writer, Event::End(BytesEnd::new("Project")))?;

    let mut document = String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())?;
    document.push('\n');
    Ok(document)
}

fn emit<W: std::io::Write>(writer: &mut Writer<W>, event: Event) -> Result<(), String> {
    writer.write_event(event).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DottedVersion;

    fn record(name: &str, version: &str) -> PackageRecord {
        PackageRecord::new(name, version.parse::<DottedVersion>().unwrap())
    }

    #[test]
    fn test_render_single_record() {
        let document = render_packages_props(&[record("LibA", "2.0.0")]);
        assert_eq!(
            document,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <Project>\n  \
               <ItemGroup>\n    \
                 <PackageVersion Include=\"LibA\" Version=\"2.0.0\"/>\n  \
               </ItemGroup>\n\
             </Project>\n"
        );
    }

    #[test]
    fn test_render_sorts_by_name() {
        let document = render_packages_props(&[
            record("Zebra", "1.0"),
            record("Alpha", "2.0"),
            record("Mid", "3.0"),
        ]);
        let alpha = document.find("Alpha").unwrap();
        let mid = document.find("Mid").unwrap();
        let zebra = document.find("Zebra").unwrap();
        assert!(alpha < mid && mid < zebra);
    }

    #[test]
    fn test_render_carries_metadata_attributes_after_version() {
        let tagged = record("Analyzer", "1.2.3")
            .with_attribute("PrivateAssets", "all")
            .with_attribute("Condition", "'$(CI)' == 'true'");
        let document = render_packages_props(&[tagged]);
        assert!(document.contains(
            "<PackageVersion Include=\"Analyzer\" Version=\"1.2.3\" PrivateAssets=\"all\" Condition=\"'$(CI)' == 'true'\"/>"
        ));
    }

    #[test]
    fn test_render_escapes_values() {
        let document = render_packages_props(&[record("A&B", "1.0")
            .with_attribute("Condition", "'$(X)' < '2'")]);
        assert!(document.contains("Include=\"A&amp;B\""));
        assert!(document.contains("&lt;"));
    }

    #[test]
    fn test_render_preserves_version_precision() {
        let document = render_packages_props(&[record("Short", "1.0"), record("Long", "1.0.0.0")]);
        assert!(document.contains("Version=\"1.0\""));
        assert!(document.contains("Version=\"1.0.0.0\""));
    }

    #[test]
    fn test_render_no_records_yields_empty_item_group() {
        let document = render_packages_props(&[]);
        assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(document.contains("<ItemGroup>"));
        assert!(!document.contains("PackageVersion"));
        assert!(document.ends_with("</Project>\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let records = [record("B", "1.0"), record("A", "2.0")];
        let reversed = [record("A", "2.0"), record("B", "1.0")];
        assert_eq!(render_packages_props(&records), render_packages_props(&reversed));
    }

    #[test]
    fn test_write_build_props_matches_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_build_props(dir.path()).unwrap();
        assert_eq!(path, dir.path().join(BUILD_PROPS_FILE));

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, BUILD_PROPS_TEMPLATE);
        assert!(content.contains("<ManagePackageVersionsCentrally>true</ManagePackageVersionsCentrally>"));
    }

    #[test]
    fn test_write_packages_props_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_packages_props(dir.path(), &[record("LibA", "1.0.0")]).unwrap();
        assert_eq!(path, dir.path().join(PACKAGES_PROPS_FILE));
        assert!(fs::read_to_string(&path).unwrap().contains("LibA"));
    }

    #[test]
    fn test_clear_outputs_removes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(BUILD_PROPS_FILE), "stale").unwrap();
        fs::write(dir.path().join(PACKAGES_PROPS_FILE), "stale").unwrap();

        clear_outputs(dir.path()).unwrap();
        assert!(!dir.path().join(BUILD_PROPS_FILE).exists());
        assert!(!dir.path().join(PACKAGES_PROPS_FILE).exists());
    }

    #[test]
    fn test_clear_outputs_ignores_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        clear_outputs(dir.path()).unwrap();
    }

    #[test]
    fn test_clear_outputs_leaves_other_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("App.csproj"), "keep me").unwrap();
        fs::write(dir.path().join(PACKAGES_PROPS_FILE), "stale").unwrap();

        clear_outputs(dir.path()).unwrap();
        assert!(dir.path().join("App.csproj").exists());
    }
}
