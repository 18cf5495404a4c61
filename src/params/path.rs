//! Dotted parameter paths.
//!
//! A path names one entry in the tree by walking group fields from the root,
//! e.g. `HTArraySpecRz.EnableRzHT`. Paths are explicit values resolved by an
//! explicit lookup; there is no attribute-style interception anywhere.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Check a single field-name identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A non-empty sequence of field-name identifiers addressing one entry in a
/// parameter tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParamPath {
    segments: Vec<String>,
}

impl ParamPath {
    /// Build a path from owned segments, validating each identifier.
    pub fn new(segments: Vec<String>) -> Result<Self, ConfigError> {
        if segments.is_empty() {
            return Err(ConfigError::InvalidPath("path has no segments".to_string()));
        }
        for segment in &segments {
            if !is_valid_identifier(segment) {
                return Err(ConfigError::InvalidPath(format!(
                    "'{}' is not a valid field name",
                    segment
                )));
            }
        }
        Ok(ParamPath { segments })
    }

    /// Build a path from segments already known to be valid identifiers.
    pub(crate) fn from_validated(segments: Vec<String>) -> Self {
        ParamPath { segments }
    }

    /// Path segments, root-first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Final segment: the field name of the addressed entry.
    pub fn leaf(&self) -> &str {
        // Invariant: segments is non-empty by construction.
        &self.segments[self.segments.len() - 1]
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: paths are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Extend this path with one more segment.
    pub fn child(&self, segment: &str) -> Result<Self, ConfigError> {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        ParamPath::new(segments)
    }

    /// True if `self` is a strict prefix of `other`.
    pub fn is_prefix_of(&self, other: &ParamPath) -> bool {
        self.segments.len() < other.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }

    /// True when neither path is a prefix of the other and they differ.
    /// Overrides to disjoint paths commute.
    pub fn is_disjoint_from(&self, other: &ParamPath) -> bool {
        self != other && !self.is_prefix_of(other) && !other.is_prefix_of(self)
    }
}

impl fmt::Display for ParamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for ParamPath {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ConfigError::InvalidPath("path is empty".to_string()));
        }
        let segments: Vec<String> = s.split('.').map(str::to_string).collect();
        for segment in &segments {
            if segment.is_empty() {
                return Err(ConfigError::InvalidPath(format!("empty segment in '{}'", s)));
            }
            if !is_valid_identifier(segment) {
                return Err(ConfigError::InvalidPath(format!(
                    "'{}' is not a valid field name (in '{}')",
                    segment, s
                )));
            }
        }
        Ok(ParamPath { segments })
    }
}

impl TryFrom<String> for ParamPath {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ParamPath> for String {
    fn from(path: ParamPath) -> Self {
        path.to_string()
    }
}
