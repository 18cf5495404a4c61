//! Override plans: ordered batches applied all-or-nothing.

use crate::error::ConfigError;
use crate::overrides::applier;
use crate::params::{ParamGroup, ParamPath, ParamValue};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One requested parameter change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Override {
    pub path: ParamPath,
    pub value: ParamValue,
    /// Disabled overrides stay in the plan and are validated when the plan
    /// is applied, but the tree keeps its previous value.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Counts reported by a successful plan application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSummary {
    pub applied: usize,
    pub skipped: usize,
}

/// An ordered list of overrides applied as a unit.
///
/// Entries apply in insertion order, so two entries for the same path end
/// with the later value. Entries for distinct paths never interact: a plan
/// permuted across disjoint paths produces the same tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverridePlan {
    #[serde(default)]
    entries: Vec<Override>,
}

impl OverridePlan {
    pub fn new() -> Self {
        OverridePlan::default()
    }

    /// Append an enabled override.
    pub fn set(mut self, path: ParamPath, value: impl Into<ParamValue>) -> Self {
        self.entries.push(Override {
            path,
            value: value.into(),
            enabled: true,
        });
        self
    }

    /// Append a disabled override. It is validated on application but the
    /// default value stays in effect.
    pub fn set_disabled(mut self, path: ParamPath, value: impl Into<ParamValue>) -> Self {
        self.entries.push(Override {
            path,
            value: value.into(),
            enabled: false,
        });
        self
    }

    /// Append an already-built entry.
    pub fn push(&mut self, entry: Override) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Override] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn enabled_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.enabled).count()
    }

    /// Apply every entry to the tree, all-or-nothing.
    ///
    /// The plan is staged on a copy of the tree; the copy replaces the tree
    /// only when every entry validated, so a failing entry leaves the tree
    /// exactly as it was. Disabled entries are validated but not written.
    pub fn apply_to(&self, tree: &mut ParamGroup) -> Result<PlanSummary, ConfigError> {
        let mut staged = tree.clone();
        let mut applied = 0;
        let mut skipped = 0;
        for entry in &self.entries {
            if entry.enabled {
                applier::apply(&mut staged, &entry.path, entry.value.clone())?;
                applied += 1;
            } else {
                applier::check(&staged, &entry.path, &entry.value)?;
                skipped += 1;
            }
        }
        *tree = staged;
        info!(applied, skipped, "Applied override plan");
        Ok(PlanSummary { applied, skipped })
    }
}
