//! Parameter leaf values and their kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single typed parameter value.
///
/// Lists are homogeneous scalar lists, mirroring the consuming framework's
/// `vbool`/`vint`/`vdouble`/`vstring` forms; the element kind is part of the
/// declared type, so an empty `IntList` and an empty `StrList` are distinct.
///
/// Serialized form is untagged (`true`, `3`, `2.5`, `"name"`, `[1, 2]`).
/// Note that an empty list deserializes as `BoolList`, since the element
/// kind cannot be recovered from `[]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
    BoolList(Vec<bool>),
    IntList(Vec<i64>),
    DoubleList(Vec<f64>),
    StrList(Vec<String>),
}

/// Kind tag for a parameter entry. `Group` never describes a leaf value; it
/// appears in diagnostics when a path addresses a subgroup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    Bool,
    Int,
    Double,
    Str,
    BoolList,
    IntList,
    DoubleList,
    StrList,
    Group,
}

impl ParamValue {
    /// Kind tag of this value. Writes to a leaf must carry exactly the kind
    /// the leaf was declared with; there is no implicit coercion.
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Double(_) => ParamKind::Double,
            ParamValue::Str(_) => ParamKind::Str,
            ParamValue::BoolList(_) => ParamKind::BoolList,
            ParamValue::IntList(_) => ParamKind::IntList,
            ParamValue::DoubleList(_) => ParamKind::DoubleList,
            ParamValue::StrList(_) => ParamKind::StrList,
        }
    }

    /// False when the value is or contains a non-finite double.
    ///
    /// Parameter doubles are finite real numbers: `inf` and `nan` are
    /// rejected wherever a value enters a tree.
    pub fn is_finite(&self) -> bool {
        match self {
            ParamValue::Double(d) => d.is_finite(),
            ParamValue::DoubleList(items) => items.iter().all(|d| d.is_finite()),
            _ => true,
        }
    }

    /// Render as a JSON value, preserving list element order.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ParamValue::Bool(b) => serde_json::Value::Bool(*b),
            ParamValue::Int(i) => serde_json::Value::from(*i),
            ParamValue::Double(d) => serde_json::Value::from(*d),
            ParamValue::Str(s) => serde_json::Value::String(s.clone()),
            ParamValue::BoolList(items) => items.iter().copied().collect(),
            ParamValue::IntList(items) => items.iter().copied().collect(),
            ParamValue::DoubleList(items) => items.iter().copied().collect(),
            ParamValue::StrList(items) => items.iter().cloned().collect(),
        }
    }

    /// Render as a TOML value, preserving list element order.
    pub fn to_toml_value(&self) -> toml::Value {
        match self {
            ParamValue::Bool(b) => toml::Value::Boolean(*b),
            ParamValue::Int(i) => toml::Value::Integer(*i),
            ParamValue::Double(d) => toml::Value::Float(*d),
            ParamValue::Str(s) => toml::Value::String(s.clone()),
            ParamValue::BoolList(items) => {
                toml::Value::Array(items.iter().map(|b| toml::Value::Boolean(*b)).collect())
            }
            ParamValue::IntList(items) => {
                toml::Value::Array(items.iter().map(|i| toml::Value::Integer(*i)).collect())
            }
            ParamValue::DoubleList(items) => {
                toml::Value::Array(items.iter().map(|d| toml::Value::Float(*d)).collect())
            }
            ParamValue::StrList(items) => toml::Value::Array(
                items.iter().map(|s| toml::Value::String(s.clone())).collect(),
            ),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamKind::Bool => "bool",
            ParamKind::Int => "int",
            ParamKind::Double => "double",
            ParamKind::Str => "string",
            ParamKind::BoolList => "vbool",
            ParamKind::IntList => "vint",
            ParamKind::DoubleList => "vdouble",
            ParamKind::StrList => "vstring",
            ParamKind::Group => "group",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_toml_value())
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Double(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<Vec<bool>> for ParamValue {
    fn from(v: Vec<bool>) -> Self {
        ParamValue::BoolList(v)
    }
}

impl From<Vec<i64>> for ParamValue {
    fn from(v: Vec<i64>) -> Self {
        ParamValue::IntList(v)
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(v: Vec<f64>) -> Self {
        ParamValue::DoubleList(v)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        ParamValue::StrList(v)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(v: Vec<&str>) -> Self {
        ParamValue::StrList(v.into_iter().map(str::to_string).collect())
    }
}
