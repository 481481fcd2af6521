//! Properties of the version identifier model.

use std::cmp::Ordering;
use std::collections::HashSet;

use proptest::prelude::*;
use version_publisher::{PublisherError, VersionIdentifier};

fn arb_version() -> impl Strategy<Value = VersionIdentifier> {
    (
        any::<u32>(),
        any::<u32>(),
        any::<u32>(),
        prop::option::of("[A-Za-z0-9][A-Za-z0-9-]{0,8}"),
    )
        .prop_map(|(major, minor, service, qualifier)| {
            let version = VersionIdentifier::new(major, minor, service);
            match qualifier {
                Some(q) => version.with_qualifier(q),
                None => version,
            }
        })
}

proptest! {
    /// Rendering then parsing gives back the same value, qualifier included.
    #[test]
    fn parse_render_round_trip(version in arb_version()) {
        let reparsed = VersionIdentifier::parse(&version.to_string()).unwrap();
        prop_assert_eq!(reparsed, version);
    }

    /// Comparing a version with itself is always Equal.
    #[test]
    fn compare_is_reflexive(version in arb_version()) {
        prop_assert_eq!(version.compare_version(&version), Ordering::Equal);
        prop_assert!(version.is_version_equal(&version));
    }

    /// Comparison is antisymmetric and matches the numeric triple.
    #[test]
    fn compare_matches_triple(a in arb_version(), b in arb_version()) {
        let expected = (a.major(), a.minor(), a.service()).cmp(&(b.major(), b.minor(), b.service()));
        prop_assert_eq!(a.compare_version(&b), expected);
        prop_assert_eq!(b.compare_version(&a), expected.reverse());
    }

    /// Ordering is transitive.
    #[test]
    fn compare_is_transitive(a in arb_version(), b in arb_version(), c in arb_version()) {
        if a.is_version_less_than_or_equal(&b) && b.is_version_less_than_or_equal(&c) {
            prop_assert!(a.is_version_less_than_or_equal(&c));
        }
    }

    /// The successor is always strictly greater and never qualified.
    #[test]
    fn successor_is_next_service(version in arb_version()) {
        prop_assume!(version.service() < u32::MAX);
        let next = version.next_service_version().unwrap();
        prop_assert!(next.is_version_greater_than(&version));
        prop_assert_eq!(next.qualifier(), None);
        prop_assert_eq!(next.service(), version.service() + 1);
        prop_assert_eq!((next.major(), next.minor()), (version.major(), version.minor()));
    }
}

#[test]
fn test_negative_construction_and_blank_parse_fail() {
    assert!(matches!(
        VersionIdentifier::try_new(-1, 0, 0),
        Err(PublisherError::InvalidVersion(_))
    ));
    assert!(matches!(
        VersionIdentifier::parse(""),
        Err(PublisherError::InvalidVersion(_))
    ));
}

#[test]
fn test_snapshot_example() {
    let upper = VersionIdentifier::parse("1.2.3-SNAPSHOT").unwrap();
    assert_eq!((upper.major(), upper.minor(), upper.service()), (1, 2, 3));
    assert_eq!(upper.qualifier(), Some("SNAPSHOT"));
    assert!(upper.is_snapshot());

    let lower = VersionIdentifier::parse("1.2.3-snapshot").unwrap();
    assert!(lower.is_snapshot());
    assert!(lower.is_version_equal(&upper));
    assert_ne!(lower, upper);
}

#[test]
fn test_short_forms_default_to_zero() {
    assert_eq!(
        VersionIdentifier::parse("2").unwrap(),
        VersionIdentifier::new(2, 0, 0)
    );
    assert_eq!(
        VersionIdentifier::parse("2.5").unwrap(),
        VersionIdentifier::new(2, 5, 0)
    );
}

#[test]
fn test_hash_follows_full_equality() {
    let mut seen = HashSet::new();
    seen.insert(VersionIdentifier::parse("1.0.0").unwrap());
    seen.insert(VersionIdentifier::parse("1.0").unwrap());
    seen.insert(VersionIdentifier::parse("1.0.0-RC1").unwrap());
    seen.insert(VersionIdentifier::parse("1.0.0-rc1").unwrap());

    assert_eq!(seen.len(), 3);
}

#[test]
fn test_sorting_by_version_keeps_qualified_entries_stable() {
    let mut versions: Vec<VersionIdentifier> = ["1.10.0", "1.2.0-RC1", "1.2.0", "0.9.9"]
        .iter()
        .map(|v| v.parse().unwrap())
        .collect();
    versions.sort_by(VersionIdentifier::compare_version);

    let rendered: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
    assert_eq!(rendered, vec!["0.9.9", "1.2.0-RC1", "1.2.0", "1.10.0"]);
}
