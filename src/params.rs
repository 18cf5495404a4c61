//! Parameter Data Model
//!
//! Typed leaves, insertion-ordered groups, and dotted paths: the tree shape
//! the defaults loader populates and the override applier mutates.

pub mod group;
pub mod path;
pub mod value;

pub use group::{ParamEntry, ParamGroup};
pub use path::ParamPath;
pub use value::{ParamKind, ParamValue};
