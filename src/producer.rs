//! Producer Configuration Publishing
//!
//! The load → override → publish pipeline. A `ProducerSetup` owns the
//! mutable tree during the configuration phase; `publish` freezes it into a
//! `ProducerHandle`, the read-only snapshot handed to whatever schedules the
//! producer. Handles are cheap to clone and safe to share across threads.

use crate::error::ConfigError;
use crate::overrides::OverridePlan;
use crate::params::{ParamGroup, ParamKind, ParamPath};
use crate::schema;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// Load the named defaults tree, apply a plan, publish the handle.
///
/// One-shot wrapper over the `ProducerSetup` pipeline; any failure aborts
/// before anything is published.
#[instrument(skip(plan))]
pub fn configure(schema_name: &str, plan: &OverridePlan) -> Result<ProducerHandle, ConfigError> {
    Ok(ProducerSetup::new(schema_name)?.with_plan(plan)?.publish())
}

/// The mutable configuration phase for one producer.
#[derive(Debug, Clone)]
pub struct ProducerSetup {
    name: String,
    tree: ParamGroup,
}

impl ProducerSetup {
    /// Start from the embedded defaults tree registered under `schema_name`.
    /// The producer publishes under the same name.
    pub fn new(schema_name: &str) -> Result<Self, ConfigError> {
        Ok(ProducerSetup {
            name: schema_name.to_string(),
            tree: schema::load(schema_name)?,
        })
    }

    /// Start from an external defaults document, publishing under `name`.
    pub fn from_file(name: &str, path: &Path) -> Result<Self, ConfigError> {
        Ok(ProducerSetup {
            name: name.to_string(),
            tree: schema::load_from_file(path)?,
        })
    }

    /// Apply an override plan, all-or-nothing.
    pub fn with_plan(mut self, plan: &OverridePlan) -> Result<Self, ConfigError> {
        plan.apply_to(&mut self.tree)?;
        Ok(self)
    }

    /// The tree as configured so far.
    pub fn params(&self) -> &ParamGroup {
        &self.tree
    }

    /// Freeze the tree into a read-only handle.
    pub fn publish(self) -> ProducerHandle {
        let fingerprint = compute_fingerprint(&self.name, &self.tree);
        info!(
            producer = %self.name,
            fingerprint = %fingerprint,
            leaves = self.tree.leaf_count(),
            "Published producer configuration"
        );
        ProducerHandle {
            name: self.name,
            params: Arc::new(self.tree),
            fingerprint,
            published_at: Utc::now(),
        }
    }
}

/// A published, read-only producer configuration.
///
/// The tree behind a handle never changes; reconfiguring a producer means
/// building a new setup and publishing a new handle. Two handles with equal
/// fingerprints carry identical parameter trees.
#[derive(Debug, Clone)]
pub struct ProducerHandle {
    name: String,
    params: Arc<ParamGroup>,
    fingerprint: String,
    published_at: DateTime<Utc>,
}

impl ProducerHandle {
    /// Name the configuration was published under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Content fingerprint of the published tree.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    /// The full parameter tree.
    pub fn params(&self) -> &ParamGroup {
        &self.params
    }

    pub fn bool_at(&self, path: &ParamPath) -> Result<bool, ConfigError> {
        self.params.bool_at(path)
    }

    pub fn int_at(&self, path: &ParamPath) -> Result<i64, ConfigError> {
        self.params.int_at(path)
    }

    pub fn double_at(&self, path: &ParamPath) -> Result<f64, ConfigError> {
        self.params.double_at(path)
    }

    pub fn str_at(&self, path: &ParamPath) -> Result<&str, ConfigError> {
        self.params.str_at(path)
    }

    pub fn bool_list_at(&self, path: &ParamPath) -> Result<&[bool], ConfigError> {
        self.params.bool_list_at(path)
    }

    pub fn int_list_at(&self, path: &ParamPath) -> Result<&[i64], ConfigError> {
        self.params.int_list_at(path)
    }

    pub fn double_list_at(&self, path: &ParamPath) -> Result<&[f64], ConfigError> {
        self.params.double_list_at(path)
    }

    pub fn str_list_at(&self, path: &ParamPath) -> Result<&[String], ConfigError> {
        self.params.str_list_at(path)
    }

    pub fn group_at(&self, path: &ParamPath) -> Result<&ParamGroup, ConfigError> {
        self.params.group_at(path)
    }

    pub fn kind_at(&self, path: &ParamPath) -> Result<ParamKind, ConfigError> {
        self.params.kind_at(path)
    }

    /// Snapshot of the tree as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        self.params.to_json()
    }

    /// Snapshot of the tree as a TOML document, suitable for re-loading.
    pub fn to_toml_string(&self) -> String {
        self.params.to_toml_table().to_string()
    }
}

/// Fingerprint = hex(blake3(name || 0x00 || canonical JSON of the tree)).
///
/// Field order in the JSON rendering is declaration order, which overrides
/// never change, so equal trees always fingerprint equally.
fn compute_fingerprint(name: &str, params: &ParamGroup) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(name.as_bytes());
    hasher.update(&[0]);
    hasher.update(params.to_json().to_string().as_bytes());
    hex::encode(hasher.finalize().as_bytes())
}
