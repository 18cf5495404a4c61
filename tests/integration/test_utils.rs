//! Shared helpers for the integration tests.

use pset::params::{ParamGroup, ParamPath};
use pset::schema::{self, TM_TRACK_PRODUCER};

/// Parse a dotted path, panicking on authoring mistakes in the test itself.
pub fn path(text: &str) -> ParamPath {
    text.parse().unwrap()
}

/// Fresh copy of the embedded track-producer defaults.
pub fn defaults() -> ParamGroup {
    schema::load(TM_TRACK_PRODUCER).unwrap()
}
