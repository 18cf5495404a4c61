//! Parameter groups: the nested, insertion-ordered tree shape.

use crate::error::ConfigError;
use crate::params::path::{is_valid_identifier, ParamPath};
use crate::params::value::{ParamKind, ParamValue};
use indexmap::IndexMap;

/// One field of a group: either a leaf value or a nested subgroup.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamEntry {
    Value(ParamValue),
    Group(ParamGroup),
}

impl ParamEntry {
    /// Kind tag of this entry (`Group` for subgroups).
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamEntry::Value(v) => v.kind(),
            ParamEntry::Group(_) => ParamKind::Group,
        }
    }
}

/// An ordered mapping from field name to leaf or subgroup.
///
/// Field order is declaration order (the order of the defaults document) and
/// is preserved through iteration and serialization. Field names are fixed
/// once the schema is loaded: the override applier replaces values but never
/// adds or removes fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamGroup {
    fields: IndexMap<String, ParamEntry>,
}

impl ParamGroup {
    pub fn new() -> Self {
        ParamGroup {
            fields: IndexMap::new(),
        }
    }

    /// Number of direct fields (leaves and subgroups).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of leaves in this group and all subgroups.
    pub fn leaf_count(&self) -> usize {
        self.fields
            .values()
            .map(|entry| match entry {
                ParamEntry::Value(_) => 1,
                ParamEntry::Group(sub) => sub.leaf_count(),
            })
            .sum()
    }

    /// Insert a leaf, replacing any existing entry of the same name.
    /// Intended for schema construction; overrides go through the applier.
    /// Double values must be finite, as everywhere else in a tree.
    pub fn insert_value(
        &mut self,
        name: &str,
        value: impl Into<ParamValue>,
    ) -> Result<(), ConfigError> {
        if !is_valid_identifier(name) {
            return Err(ConfigError::InvalidPath(format!(
                "'{}' is not a valid field name",
                name
            )));
        }
        let value = value.into();
        if !value.is_finite() {
            return Err(ConfigError::InvalidValue(format!(
                "non-finite number at '{}'",
                name
            )));
        }
        self.fields.insert(name.to_string(), ParamEntry::Value(value));
        Ok(())
    }

    /// Insert a subgroup, replacing any existing entry of the same name.
    pub fn insert_group(&mut self, name: &str, group: ParamGroup) -> Result<(), ConfigError> {
        if !is_valid_identifier(name) {
            return Err(ConfigError::InvalidPath(format!(
                "'{}' is not a valid field name",
                name
            )));
        }
        self.fields.insert(name.to_string(), ParamEntry::Group(group));
        Ok(())
    }

    /// Direct field lookup by name.
    pub fn entry(&self, name: &str) -> Option<&ParamEntry> {
        self.fields.get(name)
    }

    /// Iterate direct fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamEntry)> {
        self.fields.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Direct field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Resolve a path to the entry it addresses.
    ///
    /// Fails with `UnknownPath` when a segment names no field or when a
    /// prefix segment resolves to a leaf instead of a group.
    pub fn entry_at(&self, path: &ParamPath) -> Result<&ParamEntry, ConfigError> {
        let segments = path.segments();
        let mut group = self;
        for (depth, segment) in segments[..segments.len() - 1].iter().enumerate() {
            match group.fields.get(segment) {
                Some(ParamEntry::Group(sub)) => group = sub,
                Some(ParamEntry::Value(_)) => {
                    return Err(ConfigError::unknown_path(
                        path,
                        leaf_in_prefix_reason(&segments[..=depth]),
                    ))
                }
                None => {
                    return Err(ConfigError::unknown_path(
                        path,
                        no_such_field_reason(&segments[..depth], segment),
                    ))
                }
            }
        }
        group.fields.get(path.leaf()).ok_or_else(|| {
            ConfigError::unknown_path(
                path,
                no_such_field_reason(&segments[..segments.len() - 1], path.leaf()),
            )
        })
    }

    /// True when the path addresses an existing entry (leaf or group).
    pub fn contains(&self, path: &ParamPath) -> bool {
        self.entry_at(path).is_ok()
    }

    /// Kind tag of the entry a path addresses.
    pub fn kind_at(&self, path: &ParamPath) -> Result<ParamKind, ConfigError> {
        Ok(self.entry_at(path)?.kind())
    }

    /// Resolve a path to a subgroup. A leaf target is a `TypeMismatch`.
    pub fn group_at(&self, path: &ParamPath) -> Result<&ParamGroup, ConfigError> {
        match self.entry_at(path)? {
            ParamEntry::Group(sub) => Ok(sub),
            ParamEntry::Value(v) => Err(ConfigError::TypeMismatch {
                path: path.clone(),
                expected: v.kind(),
                found: ParamKind::Group,
            }),
        }
    }

    /// Read a boolean leaf.
    pub fn bool_at(&self, path: &ParamPath) -> Result<bool, ConfigError> {
        match self.leaf_at(path, ParamKind::Bool)? {
            ParamValue::Bool(b) => Ok(*b),
            v => Err(self.mismatch(path, v, ParamKind::Bool)),
        }
    }

    /// Read an integer leaf.
    pub fn int_at(&self, path: &ParamPath) -> Result<i64, ConfigError> {
        match self.leaf_at(path, ParamKind::Int)? {
            ParamValue::Int(i) => Ok(*i),
            v => Err(self.mismatch(path, v, ParamKind::Int)),
        }
    }

    /// Read a double leaf.
    pub fn double_at(&self, path: &ParamPath) -> Result<f64, ConfigError> {
        match self.leaf_at(path, ParamKind::Double)? {
            ParamValue::Double(d) => Ok(*d),
            v => Err(self.mismatch(path, v, ParamKind::Double)),
        }
    }

    /// Read a string leaf.
    pub fn str_at(&self, path: &ParamPath) -> Result<&str, ConfigError> {
        match self.leaf_at(path, ParamKind::Str)? {
            ParamValue::Str(s) => Ok(s),
            v => Err(self.mismatch(path, v, ParamKind::Str)),
        }
    }

    /// Read a boolean-list leaf.
    pub fn bool_list_at(&self, path: &ParamPath) -> Result<&[bool], ConfigError> {
        match self.leaf_at(path, ParamKind::BoolList)? {
            ParamValue::BoolList(items) => Ok(items),
            v => Err(self.mismatch(path, v, ParamKind::BoolList)),
        }
    }

    /// Read an integer-list leaf.
    pub fn int_list_at(&self, path: &ParamPath) -> Result<&[i64], ConfigError> {
        match self.leaf_at(path, ParamKind::IntList)? {
            ParamValue::IntList(items) => Ok(items),
            v => Err(self.mismatch(path, v, ParamKind::IntList)),
        }
    }

    /// Read a double-list leaf.
    pub fn double_list_at(&self, path: &ParamPath) -> Result<&[f64], ConfigError> {
        match self.leaf_at(path, ParamKind::DoubleList)? {
            ParamValue::DoubleList(items) => Ok(items),
            v => Err(self.mismatch(path, v, ParamKind::DoubleList)),
        }
    }

    /// Read a string-list leaf.
    pub fn str_list_at(&self, path: &ParamPath) -> Result<&[String], ConfigError> {
        match self.leaf_at(path, ParamKind::StrList)? {
            ParamValue::StrList(items) => Ok(items),
            v => Err(self.mismatch(path, v, ParamKind::StrList)),
        }
    }

    /// Paths of every leaf, in declaration order, subgroups depth-first.
    pub fn leaf_paths(&self) -> Vec<ParamPath> {
        let mut prefix = Vec::new();
        let mut out = Vec::new();
        self.collect_leaf_paths(&mut prefix, &mut out);
        out
    }

    /// Render the whole group as a JSON object, field order preserved.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (name, entry) in &self.fields {
            let value = match entry {
                ParamEntry::Value(v) => v.to_json(),
                ParamEntry::Group(sub) => sub.to_json(),
            };
            map.insert(name.clone(), value);
        }
        serde_json::Value::Object(map)
    }

    /// Render the whole group as a TOML table, field order preserved.
    pub fn to_toml_table(&self) -> toml::Table {
        let mut table = toml::Table::new();
        for (name, entry) in &self.fields {
            let value = match entry {
                ParamEntry::Value(v) => v.to_toml_value(),
                ParamEntry::Group(sub) => toml::Value::Table(sub.to_toml_table()),
            };
            table.insert(name.clone(), value);
        }
        table
    }

    /// Mutable access to the leaf a path addresses, for the override applier.
    ///
    /// A group target is reported as a mismatch against the kind being
    /// written. No mutation happens on the error paths.
    pub(crate) fn leaf_mut(
        &mut self,
        path: &ParamPath,
        incoming: ParamKind,
    ) -> Result<&mut ParamValue, ConfigError> {
        let segments = path.segments();
        let parent = self.parent_group_mut(path)?;
        match parent.fields.get_mut(path.leaf()) {
            Some(ParamEntry::Value(v)) => Ok(v),
            Some(ParamEntry::Group(_)) => Err(ConfigError::TypeMismatch {
                path: path.clone(),
                expected: ParamKind::Group,
                found: incoming,
            }),
            None => Err(ConfigError::unknown_path(
                path,
                no_such_field_reason(&segments[..segments.len() - 1], path.leaf()),
            )),
        }
    }

    /// Walk to the group containing the final path segment, mutably.
    /// Shares the `UnknownPath` contract of `entry_at`.
    fn parent_group_mut(&mut self, path: &ParamPath) -> Result<&mut ParamGroup, ConfigError> {
        let segments = path.segments();
        let mut group = self;
        for (depth, segment) in segments[..segments.len() - 1].iter().enumerate() {
            let current = group;
            match current.fields.get_mut(segment) {
                Some(ParamEntry::Group(sub)) => group = sub,
                Some(ParamEntry::Value(_)) => {
                    return Err(ConfigError::unknown_path(
                        path,
                        leaf_in_prefix_reason(&segments[..=depth]),
                    ))
                }
                None => {
                    return Err(ConfigError::unknown_path(
                        path,
                        no_such_field_reason(&segments[..depth], segment),
                    ))
                }
            }
        }
        Ok(group)
    }

    fn leaf_at(
        &self,
        path: &ParamPath,
        requested: ParamKind,
    ) -> Result<&ParamValue, ConfigError> {
        match self.entry_at(path)? {
            ParamEntry::Value(v) => Ok(v),
            ParamEntry::Group(_) => Err(ConfigError::TypeMismatch {
                path: path.clone(),
                expected: ParamKind::Group,
                found: requested,
            }),
        }
    }

    fn mismatch(&self, path: &ParamPath, declared: &ParamValue, requested: ParamKind) -> ConfigError {
        ConfigError::TypeMismatch {
            path: path.clone(),
            expected: declared.kind(),
            found: requested,
        }
    }

    fn collect_leaf_paths(&self, prefix: &mut Vec<String>, out: &mut Vec<ParamPath>) {
        for (name, entry) in &self.fields {
            prefix.push(name.clone());
            match entry {
                ParamEntry::Value(_) => out.push(ParamPath::from_validated(prefix.clone())),
                ParamEntry::Group(sub) => sub.collect_leaf_paths(prefix, out),
            }
            prefix.pop();
        }
    }
}

fn no_such_field_reason(prefix: &[String], name: &str) -> String {
    if prefix.is_empty() {
        format!("the root group has no field named '{}'", name)
    } else {
        format!("group '{}' has no field named '{}'", prefix.join("."), name)
    }
}

fn leaf_in_prefix_reason(walked: &[String]) -> String {
    format!("'{}' is a leaf, not a parameter group", walked.join("."))
}
