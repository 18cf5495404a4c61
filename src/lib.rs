//! Pset: Typed Parameter Trees for Trigger Producers
//!
//! A hierarchical, path-addressed parameter-override system: defaults
//! documents load into fully typed trees, overrides replace individual
//! leaves with strict type checking, and the finished tree publishes as an
//! immutable handle for the processing framework to read.

pub mod error;
pub mod logging;
pub mod overrides;
pub mod params;
pub mod producer;
pub mod schema;
