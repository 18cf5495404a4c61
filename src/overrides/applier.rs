//! Single-override application.

use crate::error::ConfigError;
use crate::params::{ParamEntry, ParamGroup, ParamKind, ParamPath, ParamValue};
use tracing::debug;

/// Replace the leaf at `path` with `value`.
///
/// The override must address an existing leaf of the same kind; groups are
/// not replaceable and unknown paths are rejected. Double values must be
/// finite, the same rule the loader enforces on defaults documents. The
/// tree is untouched on every error path. Re-applying the same override is
/// a no-op beyond the first application.
pub fn apply(
    tree: &mut ParamGroup,
    path: &ParamPath,
    value: ParamValue,
) -> Result<(), ConfigError> {
    ensure_finite(path, &value)?;
    let incoming = value.kind();
    let slot = tree.leaf_mut(path, incoming)?;
    if slot.kind() != incoming {
        return Err(ConfigError::TypeMismatch {
            path: path.clone(),
            expected: slot.kind(),
            found: incoming,
        });
    }
    *slot = value;
    debug!(path = %path, kind = %incoming, "Applied override");
    Ok(())
}

/// Check that an override would apply cleanly, without mutating the tree.
///
/// Produces exactly the error `apply` would for the same inputs.
pub fn check(tree: &ParamGroup, path: &ParamPath, value: &ParamValue) -> Result<(), ConfigError> {
    ensure_finite(path, value)?;
    match tree.entry_at(path)? {
        ParamEntry::Group(_) => Err(ConfigError::TypeMismatch {
            path: path.clone(),
            expected: ParamKind::Group,
            found: value.kind(),
        }),
        ParamEntry::Value(current) if current.kind() == value.kind() => Ok(()),
        ParamEntry::Value(current) => Err(ConfigError::TypeMismatch {
            path: path.clone(),
            expected: current.kind(),
            found: value.kind(),
        }),
    }
}

// A non-finite double carries the right kind tag but is not a legal
// parameter value, so it is caught before any path resolution.
fn ensure_finite(path: &ParamPath, value: &ParamValue) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(format!(
            "non-finite number at '{}'",
            path
        )))
    }
}
