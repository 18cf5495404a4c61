//! Error types for the parameter-set configuration phase.

use crate::params::{ParamKind, ParamPath};
use thiserror::Error;

/// Errors raised while loading defaults, applying overrides, or setting up
/// logging. Every variant is fatal to the configuration phase: nothing
/// partial is ever published.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// Defaults source missing, unreadable, or malformed.
    #[error("Schema load failed for '{name}': {reason}")]
    SchemaLoad { name: String, reason: String },

    /// A path segment names no existing field, or the path runs through a
    /// leaf where a group is required.
    #[error("Unknown parameter path '{path}': {reason}")]
    UnknownPath { path: ParamPath, reason: String },

    /// The supplied or requested kind disagrees with the kind the tree
    /// declares at that path.
    #[error("Type mismatch at '{path}': expected {expected}, got {found}")]
    TypeMismatch {
        path: ParamPath,
        expected: ParamKind,
        found: ParamKind,
    },

    /// The dotted string form could not be parsed into identifiers.
    #[error("Invalid parameter path: {0}")]
    InvalidPath(String),

    /// The value lies outside the parameter domain, e.g. a non-finite
    /// double. The kind tag alone does not catch these.
    #[error("Invalid parameter value: {0}")]
    InvalidValue(String),

    /// Logging subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl ConfigError {
    /// Build a `SchemaLoad` error for the named defaults source.
    pub(crate) fn schema(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::SchemaLoad {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Build an `UnknownPath` error with a human-readable reason.
    pub(crate) fn unknown_path(path: &ParamPath, reason: impl Into<String>) -> Self {
        ConfigError::UnknownPath {
            path: path.clone(),
            reason: reason.into(),
        }
    }
}
