//! Persisted-layout round-trips (run with `--features cache`).
//!
//! A committed index is serialized alongside the rest of a module's
//! metadata and reloaded verbatim on import - in particular, the sort
//! order is the producer's and is never recomputed on load.

#![cfg(feature = "cache")]
#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use lyra_attr::{Entry, PersistentIndex};
use lyra_ir::{Environment, Name, Ty};

#[test]
fn committed_array_round_trips_through_bincode() {
    let mut env = Environment::new();
    env.begin_module(Name::root("A")).unwrap();
    let mut index: PersistentIndex<Option<Name>> = PersistentIndex::new();
    for (decl, target) in [
        ("A.c", None),
        ("A.a", Some("A.setup")),
        ("A.b", None),
    ] {
        let name = Name::from_dotted(decl);
        env.add_const(name.clone(), Ty::io_unit()).unwrap();
        index
            .set_param(name, target.map(Name::from_dotted))
            .unwrap();
    }
    let id = env.end_module().unwrap();
    index.commit_module(id).unwrap();

    let exported = index.exported_entries(id).unwrap();
    let bytes = bincode::serialize(&exported.to_vec()).unwrap();
    let reloaded: Vec<Entry<Option<Name>>> = bincode::deserialize(&bytes).unwrap();

    // Byte-for-byte the same array, still sorted, no re-sort needed.
    assert_eq!(reloaded, exported.to_vec());
    assert!(reloaded.windows(2).all(|w| w[0].name < w[1].name));

    // A second session imports the reloaded array and answers queries
    // identically.
    let mut env2 = Environment::new();
    let id2 = env2
        .import_module(
            Name::root("A"),
            ["A.a", "A.b", "A.c"]
                .iter()
                .map(|d| (Name::from_dotted(d), Ty::io_unit()))
                .collect(),
        )
        .unwrap();
    let mut index2: PersistentIndex<Option<Name>> = PersistentIndex::new();
    index2.import_module(id2, reloaded).unwrap();

    assert_eq!(
        index2.get_param(&env2, &Name::from_dotted("A.a")),
        Some(&Some(Name::from_dotted("A.setup")))
    );
    assert_eq!(index2.get_param(&env2, &Name::from_dotted("A.b")), Some(&None));
    assert_eq!(index2.get_param(&env2, &Name::from_dotted("A.z")), None);
}

#[test]
fn reloaded_names_keep_the_quick_order() {
    let names: Vec<Name> = ["b", "a.a", "9", "10", "z.1"]
        .iter()
        .map(|s| Name::from_dotted(s))
        .collect();
    let bytes = bincode::serialize(&names).unwrap();
    let reloaded: Vec<Name> = bincode::deserialize(&bytes).unwrap();

    let mut original_sorted = names.clone();
    original_sorted.sort();
    let mut reloaded_sorted = reloaded;
    reloaded_sorted.sort();
    assert_eq!(original_sorted, reloaded_sorted);
}
