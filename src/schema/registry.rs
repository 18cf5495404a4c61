//! Embedded defaults documents, compiled into the binary.

/// Name under which the track-producer configuration is published.
pub const TM_TRACK_PRODUCER: &str = "TMTrackProducer";

/// Defaults documents embedded at compile time, keyed by schema name.
pub const EMBEDDED_SCHEMAS: &[(&str, &str)] = &[(
    TM_TRACK_PRODUCER,
    include_str!("../../defaults/tm_track_producer.toml"),
)];

/// Look up the embedded defaults document for a schema name.
pub fn document_for(name: &str) -> Option<&'static str> {
    EMBEDDED_SCHEMAS
        .iter()
        .find(|(schema, _)| *schema == name)
        .map(|(_, text)| *text)
}

/// Names of all embedded schemas.
pub fn schema_names() -> Vec<&'static str> {
    EMBEDDED_SCHEMAS.iter().map(|(name, _)| *name).collect()
}
