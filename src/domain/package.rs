//! Resolved package records
//!
//! A record pairs a package name with the single version chosen for it plus
//! any attribute-expressed metadata carried over from the declaration that
//! won conflict resolution.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DottedVersion;

/// One package with its chosen version and carried metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Package name as declared (case preserved)
    pub name: String,

    /// The version chosen for this package
    pub version: DottedVersion,

    /// Attribute metadata from the winning declaration, in encounter order,
    /// excluding the name and version attributes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, String)>,
}

impl PackageRecord {
    /// Creates a record with no carried metadata
    pub fn new(name: impl Into<String>, version: DottedVersion) -> Self {
        PackageRecord {
            name: name.into(),
            version,
            attributes: Vec::new(),
        }
    }

    /// Appends one metadata attribute, builder style
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}
