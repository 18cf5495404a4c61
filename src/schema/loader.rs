//! Defaults document parsing and validation.

use crate::error::ConfigError;
use crate::params::path::is_valid_identifier;
use crate::params::{ParamEntry, ParamGroup, ParamKind, ParamValue};
use crate::schema::registry;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Load the embedded defaults tree registered under `name`.
pub fn load(name: &str) -> Result<ParamGroup, ConfigError> {
    let text = registry::document_for(name).ok_or_else(|| {
        ConfigError::schema(name, "no embedded defaults document with this name")
    })?;
    parse_document(name, text)
}

/// Load a defaults tree from an external TOML document.
///
/// The file must satisfy the same rules as the embedded documents: every
/// leaf carries a concrete type and lists are non-empty and homogeneous.
pub fn load_from_file(path: &Path) -> Result<ParamGroup, ConfigError> {
    let name = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::schema(&name, format!("cannot read defaults document: {}", e))
    })?;
    parse_document(&name, &text)
}

/// Parse and validate a defaults document into a typed tree.
pub(crate) fn parse_document(name: &str, text: &str) -> Result<ParamGroup, ConfigError> {
    let started = Instant::now();
    let table: toml::Table = text.parse().map_err(|e: toml::de::Error| {
        ConfigError::schema(name, format!("defaults document is not valid TOML: {}", e.message()))
    })?;

    let mut prefix = Vec::new();
    let tree = convert_table(name, &mut prefix, &table)?;
    if tree.is_empty() {
        return Err(ConfigError::schema(name, "defaults document declares no parameters"));
    }

    let groups = tree
        .iter()
        .filter(|(_, entry)| matches!(entry, ParamEntry::Group(_)))
        .count();
    info!(
        schema = name,
        groups,
        leaves = tree.leaf_count(),
        duration_ms = started.elapsed().as_millis() as u64,
        "Loaded defaults tree"
    );
    Ok(tree)
}

fn convert_table(
    name: &str,
    prefix: &mut Vec<String>,
    table: &toml::Table,
) -> Result<ParamGroup, ConfigError> {
    let mut group = ParamGroup::new();
    for (field, value) in table {
        prefix.push(field.clone());
        if !is_valid_identifier(field) {
            return Err(ConfigError::schema(
                name,
                format!("'{}' is not a valid field name", prefix.join(".")),
            ));
        }
        match value {
            toml::Value::Table(inner) => {
                let sub = convert_table(name, prefix, inner)?;
                group.insert_group(field, sub)?;
            }
            toml::Value::Array(items) => {
                group.insert_value(field, convert_list(name, prefix, items)?)?;
            }
            scalar => {
                group.insert_value(field, convert_scalar(name, prefix, scalar)?)?;
            }
        }
        prefix.pop();
    }
    Ok(group)
}

fn convert_list(
    name: &str,
    prefix: &mut Vec<String>,
    items: &[toml::Value],
) -> Result<ParamValue, ConfigError> {
    let first = items.first().ok_or_else(|| {
        ConfigError::schema(
            name,
            format!(
                "empty list at '{}': a list needs at least one element to fix its element type",
                prefix.join(".")
            ),
        )
    })?;

    match first {
        toml::Value::Boolean(_) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match convert_scalar(name, prefix, item)? {
                    ParamValue::Bool(b) => out.push(b),
                    other => return Err(mixed_list(name, prefix, ParamKind::Bool, other.kind())),
                }
            }
            Ok(ParamValue::BoolList(out))
        }
        toml::Value::Integer(_) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match convert_scalar(name, prefix, item)? {
                    ParamValue::Int(i) => out.push(i),
                    other => return Err(mixed_list(name, prefix, ParamKind::Int, other.kind())),
                }
            }
            Ok(ParamValue::IntList(out))
        }
        toml::Value::Float(_) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match convert_scalar(name, prefix, item)? {
                    ParamValue::Double(d) => out.push(d),
                    other => return Err(mixed_list(name, prefix, ParamKind::Double, other.kind())),
                }
            }
            Ok(ParamValue::DoubleList(out))
        }
        toml::Value::String(_) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match convert_scalar(name, prefix, item)? {
                    ParamValue::Str(s) => out.push(s),
                    other => return Err(mixed_list(name, prefix, ParamKind::Str, other.kind())),
                }
            }
            Ok(ParamValue::StrList(out))
        }
        // Nested lists, tables and datetimes are not valid list elements;
        // scalar conversion produces the matching error for each.
        other => convert_scalar(name, prefix, other),
    }
}

fn convert_scalar(
    name: &str,
    prefix: &mut Vec<String>,
    value: &toml::Value,
) -> Result<ParamValue, ConfigError> {
    match value {
        toml::Value::Boolean(b) => Ok(ParamValue::Bool(*b)),
        toml::Value::Integer(i) => Ok(ParamValue::Int(*i)),
        toml::Value::Float(f) if f.is_finite() => Ok(ParamValue::Double(*f)),
        toml::Value::Float(_) => Err(ConfigError::schema(
            name,
            format!("non-finite number at '{}'", prefix.join(".")),
        )),
        toml::Value::String(s) => Ok(ParamValue::Str(s.clone())),
        toml::Value::Datetime(_) => Err(ConfigError::schema(
            name,
            format!("unsupported datetime value at '{}'", prefix.join(".")),
        )),
        toml::Value::Array(_) => Err(ConfigError::schema(
            name,
            format!("nested list at '{}'", prefix.join(".")),
        )),
        toml::Value::Table(_) => Err(ConfigError::schema(
            name,
            format!("a group may not appear inside a list at '{}'", prefix.join(".")),
        )),
    }
}

fn mixed_list(name: &str, prefix: &[String], expected: ParamKind, found: ParamKind) -> ConfigError {
    ConfigError::schema(
        name,
        format!(
            "mixed list at '{}': expected {} elements, got {}",
            prefix.join("."),
            expected,
            found
        ),
    )
}
