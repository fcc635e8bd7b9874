//! Tests for change detection.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::network::AddressSet;

use super::{Change, detect_change};

fn v4(s: &str) -> Option<Ipv4Addr> {
    Some(s.parse().unwrap())
}

fn v6(s: &str) -> Option<Ipv6Addr> {
    Some(s.parse().unwrap())
}

#[test]
fn empty_current_is_no_addresses() {
    let baseline = AddressSet::new(v4("203.0.113.5"), None);

    assert_eq!(
        detect_change(baseline, AddressSet::default()),
        Change::NoAddresses
    );
}

#[test]
fn empty_current_with_empty_baseline_is_no_addresses() {
    assert_eq!(
        detect_change(AddressSet::default(), AddressSet::default()),
        Change::NoAddresses
    );
}

#[test]
fn equal_sets_are_unchanged() {
    let set = AddressSet::new(v4("203.0.113.5"), v6("2001:db8::1"));

    assert_eq!(detect_change(set, set), Change::Unchanged);
}

#[test]
fn empty_baseline_always_changes() {
    let current = AddressSet::new(v4("203.0.113.5"), None);

    assert_eq!(
        detect_change(AddressSet::default(), current),
        Change::Changed {
            previous: AddressSet::default(),
            current,
        }
    );
}

#[test]
fn different_ipv4_changes() {
    let baseline = AddressSet::new(v4("203.0.113.5"), None);
    let current = AddressSet::new(v4("203.0.113.6"), None);

    assert!(matches!(
        detect_change(baseline, current),
        Change::Changed { previous, current: c } if previous == baseline && c == current
    ));
}

#[test]
fn gaining_a_family_changes() {
    let baseline = AddressSet::new(v4("203.0.113.5"), None);
    let current = AddressSet::new(v4("203.0.113.5"), v6("2001:db8::1"));

    assert!(matches!(
        detect_change(baseline, current),
        Change::Changed { .. }
    ));
}

#[test]
fn losing_a_family_changes() {
    let baseline = AddressSet::new(v4("203.0.113.5"), v6("2001:db8::1"));
    let current = AddressSet::new(v4("203.0.113.5"), None);

    assert!(matches!(
        detect_change(baseline, current),
        Change::Changed { .. }
    ));
}

#[test]
fn equivalent_ipv6_spellings_are_unchanged() {
    let baseline = AddressSet::decode("ipv6=2001%3Adb8%3A0%3A0%3A0%3A0%3A0%3A1").unwrap();
    let current = AddressSet::new(None, v6("2001:db8::1"));

    assert_eq!(detect_change(baseline, current), Change::Unchanged);
}
