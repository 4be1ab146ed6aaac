use super::{Name, NamePart};
use pretty_assertions::assert_eq;
use std::cmp::Ordering;

#[test]
fn display_joins_with_dots() {
    let n = Name::root("Foo").child("bar").child(3u64);
    assert_eq!(n.to_string(), "Foo.bar.3");
}

#[test]
fn from_dotted_round_trips_display() {
    let n = Name::from_dotted("Foo.bar.3");
    assert_eq!(n, Name::root("Foo").child("bar").child(3u64));
    assert_eq!(n.to_string(), "Foo.bar.3");
}

#[test]
fn clones_compare_equal() {
    let n = Name::from_dotted("A.b");
    let m = n.clone();
    assert_eq!(n, m);
    assert_eq!(n.cmp(&m), Ordering::Equal);
}

#[test]
fn structurally_equal_names_compare_equal() {
    // Separate allocations, same content.
    let n = Name::from_dotted("A.b");
    let m = Name::root("A").child("b");
    assert_eq!(n, m);
    assert_eq!(n.cmp(&m), Ordering::Equal);
}

#[test]
fn quick_order_sorts_shorter_paths_first() {
    // Display order would put "a.a" before "b"; the quick order does not.
    let nested = Name::from_dotted("a.a");
    let flat = Name::root("b");
    assert!(flat < nested);
    assert!(nested.to_string() < flat.to_string());
}

#[test]
fn quick_order_compares_numeric_parts_numerically() {
    // As strings "10" < "9"; as numeric parts 9 < 10.
    let nine = Name::root(9u64);
    let ten = Name::root(10u64);
    assert!(nine < ten);
    assert!(ten.to_string() < nine.to_string());
}

#[test]
fn numeric_parts_order_before_string_parts() {
    let num = Name::root(0u64);
    let s = Name::root("a");
    assert!(num < s);
}

#[test]
fn ends_with_matches_suffixes() {
    let n = Name::from_dotted("A.b.c");
    assert!(n.ends_with(&Name::from_dotted("c")));
    assert!(n.ends_with(&Name::from_dotted("b.c")));
    assert!(n.ends_with(&n.clone()));
    assert!(!n.ends_with(&Name::from_dotted("A.b")));
    assert!(!n.ends_with(&Name::from_dotted("x.A.b.c")));
}

#[test]
fn parts_are_preserved() {
    let n = Name::from_dotted("A.7");
    assert_eq!(
        n.parts(),
        &[NamePart::Str("A".into()), NamePart::Num(7)]
    );
    assert_eq!(n.num_parts(), 2);
}
