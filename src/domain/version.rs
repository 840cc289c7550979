//! Dotted numeric versions in the classic assembly style
//!
//! A version is one to four dot-separated numeric components
//! (`major[.minor[.build[.revision]]]`). Ordering is component-wise and an
//! absent component sorts below a present zero, so `1.0 < 1.0.0 < 1.0.1`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Why a version string failed to parse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    /// Empty or whitespace-only input
    #[error("empty version string")]
    Empty,

    /// More than four dot-separated components
    #[error("version '{0}' has more than four components")]
    TooManyComponents(String),

    /// A component is not an unsigned number
    #[error("version '{0}' has a non-numeric component")]
    InvalidComponent(String),
}

/// A dotted numeric version with up to four components
///
/// Trailing components are optional and preserved as written: `"1.0"` and
/// `"1.0.0"` are distinct values that display differently and compare
/// unequal. Derived ordering over the option fields gives the
/// absent-sorts-first behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DottedVersion {
    major: u64,
    minor: Option<u64>,
    build: Option<u64>,
    revision: Option<u64>,
}

impl DottedVersion {
    /// First component
    pub fn major(&self) -> u64 {
        self.major
    }

    /// Number of components as written, between 1 and 4
    pub fn component_count(&self) -> usize {
        1 + [self.minor, self.build, self.revision]
            .iter()
            .filter(|part| part.is_some())
            .count()
    }
}

impl FromStr for DottedVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let mut components = [None; 4];
        let mut count = 0;
        for piece in s.split('.') {
            if count == components.len() {
                return Err(VersionParseError::TooManyComponents(s.to_string()));
            }
            let value: u64 = piece
                .parse()
                .map_err(|_| VersionParseError::InvalidComponent(s.to_string()))?;
            components[count] = Some(value);
            count += 1;
        }

        let [major, minor, build, revision] = components;
        let Some(major) = major else {
            return Err(VersionParseError::Empty);
        };
        Ok(DottedVersion {
            major,
            minor,
            build,
            revision,
        })
    }
}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        for part in [self.minor, self.build, self.revision].into_iter().flatten() {
            write!(f, ".{}", part)?;
        }
        Ok(())
    }
}

impl Serialize for DottedVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DottedVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
