//! Property-based tests for the algebra of override application

use proptest::prelude::*;
use pset::error::ConfigError;
use pset::overrides::apply;
use pset::params::{ParamKind, ParamPath, ParamValue};
use pset::schema::{self, TM_TRACK_PRODUCER};

/// A replacement value matching the declared kind of a leaf.
fn replacement_for(kind: ParamKind, b: bool, i: i64, d: f64, s: &str) -> ParamValue {
    match kind {
        ParamKind::Bool => ParamValue::Bool(b),
        ParamKind::Int => ParamValue::Int(i),
        ParamKind::Double => ParamValue::Double(d),
        ParamKind::Str => ParamValue::Str(s.to_string()),
        ParamKind::BoolList => ParamValue::BoolList(vec![b, !b]),
        ParamKind::IntList => ParamValue::IntList(vec![i]),
        ParamKind::DoubleList => ParamValue::DoubleList(vec![d, d]),
        ParamKind::StrList => ParamValue::StrList(vec![s.to_string()]),
        ParamKind::Group => unreachable!("leaf paths never address groups"),
    }
}

/// A value whose kind is guaranteed to disagree with the leaf's.
fn mismatched_for(kind: ParamKind, b: bool, i: i64) -> ParamValue {
    match kind {
        ParamKind::Bool => ParamValue::Int(i),
        _ => ParamValue::Bool(b),
    }
}

/// Applying the same override twice yields the tree of a single application.
#[test]
fn test_override_idempotence_property() {
    let defaults = schema::load(TM_TRACK_PRODUCER).unwrap();
    let leaves = defaults.leaf_paths();

    let mut runner = proptest::test_runner::TestRunner::default();
    runner
        .run(
            &(
                any::<prop::sample::Index>(),
                any::<bool>(),
                any::<i64>(),
                -1.0e6..1.0e6f64,
                "[A-Za-z0-9_]{0,16}",
            ),
            |(index, b, i, d, s)| {
                let target = index.get(&leaves).clone();
                let kind = defaults.kind_at(&target).unwrap();
                let value = replacement_for(kind, b, i, d, &s);

                let mut once = defaults.clone();
                apply(&mut once, &target, value.clone()).unwrap();
                let mut twice = once.clone();
                apply(&mut twice, &target, value).unwrap();

                assert_eq!(once, twice);
                Ok(())
            },
        )
        .unwrap();
}

/// Overrides to distinct leaves commute. Leaf paths are never prefixes of
/// one another, so distinct leaves are always disjoint.
#[test]
fn test_disjoint_overrides_commute_property() {
    let defaults = schema::load(TM_TRACK_PRODUCER).unwrap();
    let leaves = defaults.leaf_paths();

    let mut runner = proptest::test_runner::TestRunner::default();
    runner
        .run(
            &(
                any::<prop::sample::Index>(),
                any::<prop::sample::Index>(),
                any::<bool>(),
                any::<i64>(),
                -1.0e6..1.0e6f64,
                "[A-Za-z0-9_]{0,16}",
            ),
            |(first, second, b, i, d, s)| {
                let p1 = first.get(&leaves).clone();
                let p2 = second.get(&leaves).clone();
                prop_assume!(p1 != p2);

                let v1 = replacement_for(defaults.kind_at(&p1).unwrap(), b, i, d, &s);
                let v2 = replacement_for(
                    defaults.kind_at(&p2).unwrap(),
                    !b,
                    i.wrapping_add(1),
                    d / 2.0,
                    &s,
                );

                let mut forward = defaults.clone();
                apply(&mut forward, &p1, v1.clone()).unwrap();
                apply(&mut forward, &p2, v2.clone()).unwrap();

                let mut reverse = defaults.clone();
                apply(&mut reverse, &p2, v2).unwrap();
                apply(&mut reverse, &p1, v1).unwrap();

                assert_eq!(forward, reverse);
                Ok(())
            },
        )
        .unwrap();
}

/// A kind mismatch on any leaf leaves the whole tree unchanged.
#[test]
fn test_mismatched_override_preserves_tree_property() {
    let defaults = schema::load(TM_TRACK_PRODUCER).unwrap();
    let leaves = defaults.leaf_paths();

    let mut runner = proptest::test_runner::TestRunner::default();
    runner
        .run(
            &(any::<prop::sample::Index>(), any::<bool>(), any::<i64>()),
            |(index, b, i)| {
                let target = index.get(&leaves).clone();
                let kind = defaults.kind_at(&target).unwrap();

                let mut tree = defaults.clone();
                let err = apply(&mut tree, &target, mismatched_for(kind, b, i)).unwrap_err();
                assert!(matches!(err, ConfigError::TypeMismatch { .. }));
                assert_eq!(tree, defaults);
                Ok(())
            },
        )
        .unwrap();
}

/// An override naming an absent root field fails and changes nothing.
#[test]
fn test_unknown_path_preserves_tree_property() {
    let defaults = schema::load(TM_TRACK_PRODUCER).unwrap();

    let mut runner = proptest::test_runner::TestRunner::default();
    runner
        .run(&"[A-Za-z][A-Za-z0-9_]{0,12}", |name| {
            prop_assume!(defaults.entry(&name).is_none());
            let target: ParamPath = name.parse().unwrap();

            let mut tree = defaults.clone();
            let err = apply(&mut tree, &target, ParamValue::Bool(true)).unwrap_err();
            assert!(matches!(err, ConfigError::UnknownPath { .. }));
            assert_eq!(tree, defaults);
            Ok(())
        })
        .unwrap();
}
