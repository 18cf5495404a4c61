//! Integration tests for producer configuration publishing

use super::test_utils::path;
use pset::error::ConfigError;
use pset::logging::init_logging;
use pset::overrides::OverridePlan;
use pset::producer::{configure, ProducerSetup};
use pset::schema::TM_TRACK_PRODUCER;
use tempfile::TempDir;

#[test]
fn test_full_pipeline_logs_and_publishes() {
    // Sole caller of init_logging in this binary; later calls would be
    // rejected by the global subscriber.
    init_logging(None).unwrap();

    let plan = OverridePlan::new().set(path("HTArraySpecRz.EnableRzHT"), true);
    let handle = configure(TM_TRACK_PRODUCER, &plan).unwrap();

    assert_eq!(handle.name(), "TMTrackProducer");
    assert!(handle.bool_at(&path("HTArraySpecRz.EnableRzHT")).unwrap());
    assert_eq!(handle.fingerprint().len(), 64);
    assert!(handle.fingerprint().chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_published_handles_are_independent_snapshots() {
    let baseline = configure(TM_TRACK_PRODUCER, &OverridePlan::new()).unwrap();

    let plan = OverridePlan::new().set(path("HTFillingRphi.MaxStubsInCell"), 48);
    let tuned = configure(TM_TRACK_PRODUCER, &plan).unwrap();

    // Reconfiguring produced a new handle; the first one kept its values.
    assert_eq!(baseline.int_at(&path("HTFillingRphi.MaxStubsInCell")).unwrap(), 32);
    assert_eq!(tuned.int_at(&path("HTFillingRphi.MaxStubsInCell")).unwrap(), 48);
    assert_ne!(baseline.fingerprint(), tuned.fingerprint());
}

#[test]
fn test_non_finite_override_never_publishes() {
    // A NaN carries the right kind tag but must be stopped before any
    // handle exists, or the snapshot would not reload.
    let plan = OverridePlan::new().set(path("StubCuts.BendResolutionExtra"), f64::NAN);
    let err = configure(TM_TRACK_PRODUCER, &plan).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidValue(
            "non-finite number at 'StubCuts.BendResolutionExtra'".to_string()
        )
    );
}

#[test]
fn test_snapshot_exports_and_reloads() {
    let plan = OverridePlan::new().set(path("RZfilterOpts.UseSeedFilter"), true);
    let handle = configure(TM_TRACK_PRODUCER, &plan).unwrap();

    let temp_dir = TempDir::new().unwrap();
    let snapshot = temp_dir.path().join("snapshot.toml");
    std::fs::write(&snapshot, handle.to_toml_string()).unwrap();

    let reloaded = ProducerSetup::from_file(handle.name(), &snapshot)
        .unwrap()
        .publish();
    assert_eq!(reloaded.fingerprint(), handle.fingerprint());
    assert!(reloaded.bool_at(&path("RZfilterOpts.UseSeedFilter")).unwrap());
}

#[test]
fn test_json_snapshot_carries_whole_tree() {
    let handle = configure(TM_TRACK_PRODUCER, &OverridePlan::new()).unwrap();
    let json = handle.to_json();

    let object = json.as_object().unwrap();
    assert!(object.contains_key("HTArraySpecRz"));
    assert_eq!(
        object["HTArraySpecRz"]["EnableRzHT"],
        serde_json::Value::Bool(false)
    );
    assert_eq!(object["FirmwareType"], serde_json::Value::from(1));
}

#[test]
fn test_params_exposes_the_published_tree() {
    let setup = ProducerSetup::new(TM_TRACK_PRODUCER).unwrap();
    let configured = setup.params().clone();
    assert_eq!(configured.leaf_count(), 83);

    let handle = setup.publish();
    assert_eq!(handle.params(), &configured);
    assert!(handle.params().contains(&path("HTArraySpecRz.EnableRzHT")));
}

#[test]
fn test_reading_through_the_handle_uses_tree_errors() {
    let handle = configure(TM_TRACK_PRODUCER, &OverridePlan::new()).unwrap();
    assert!(handle.int_at(&path("HTArraySpecRz.NoSuchField")).is_err());
    assert!(handle.group_at(&path("HTArraySpecRz")).is_ok());
}
