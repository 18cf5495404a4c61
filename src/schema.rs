//! Default Tree Schemas
//!
//! Embedded defaults documents and the loader that turns them into fully
//! typed parameter trees. The loaded tree is the complete schema: every
//! parameter a producer reads exists here with its declared type, and
//! overrides are validated against it.

pub mod loader;
pub mod registry;

pub use loader::{load, load_from_file};
pub use registry::{schema_names, TM_TRACK_PRODUCER};
