#![expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

use super::{Entry, IndexError, PersistentIndex};
use lyra_ir::{Environment, ModuleId, Name, Ty};
use pretty_assertions::assert_eq;

/// Compile a module of `decls` into `env` and register each into `index`,
/// in the given order; commit afterwards.
fn compile_module(
    env: &mut Environment,
    index: &mut PersistentIndex<u32>,
    module: &str,
    decls: &[(&str, u32)],
) -> ModuleId {
    env.begin_module(Name::root(module)).unwrap();
    for (decl, value) in decls {
        let name = Name::from_dotted(decl);
        env.add_const(name.clone(), Ty::io_unit()).unwrap();
        index.set_param(name, *value).unwrap();
    }
    let id = env.end_module().unwrap();
    index.commit_module(id).unwrap();
    id
}

#[test]
fn round_trip_through_commit() {
    let mut env = Environment::new();
    let mut index = PersistentIndex::new();
    compile_module(
        &mut env,
        &mut index,
        "A",
        &[("A.c", 3), ("A.a", 1), ("A.b", 2)],
    );

    for (decl, value) in [("A.a", 1u32), ("A.b", 2), ("A.c", 3)] {
        assert_eq!(index.get_param(&env, &Name::from_dotted(decl)), Some(&value));
    }
    assert_eq!(index.get_param(&env, &Name::from_dotted("A.z")), None);
    assert_eq!(index.pending_len(), 0);
}

#[test]
fn pending_is_queried_while_the_module_is_open() {
    let mut env = Environment::new();
    let mut index: PersistentIndex<u32> = PersistentIndex::new();
    env.begin_module(Name::root("A")).unwrap();
    let decl = Name::from_dotted("A.x");
    env.add_const(decl.clone(), Ty::io_unit()).unwrap();

    assert_eq!(index.get_param(&env, &decl), None);
    index.set_param(decl.clone(), 7).unwrap();
    assert_eq!(index.get_param(&env, &decl), Some(&7));
    assert!(index.contains(&env, &decl));
}

#[test]
fn committed_arrays_are_sorted_for_any_insertion_order() {
    let orders: [&[(&str, u32)]; 3] = [
        &[("M.a", 0), ("M.b", 1), ("M.c", 2), ("M.d", 3)],
        &[("M.d", 3), ("M.c", 2), ("M.b", 1), ("M.a", 0)],
        &[("M.c", 2), ("M.a", 0), ("M.d", 3), ("M.b", 1)],
    ];
    for decls in orders {
        let mut env = Environment::new();
        let mut index = PersistentIndex::new();
        let id = compile_module(&mut env, &mut index, "M", decls);
        let snapshot = index.exported_entries(id).unwrap();
        assert!(snapshot.windows(2).all(|w| w[0].name < w[1].name));
        assert_eq!(snapshot.len(), 4);
    }
}

#[test]
fn duplicate_in_pending_is_rejected() {
    let mut env = Environment::new();
    let mut index = PersistentIndex::new();
    env.begin_module(Name::root("A")).unwrap();
    let decl = Name::from_dotted("A.x");
    env.add_const(decl.clone(), Ty::io_unit()).unwrap();
    index.set_param(decl.clone(), 1).unwrap();
    assert_eq!(
        index.set_param(decl.clone(), 2).unwrap_err(),
        IndexError::DuplicateDeclaration { name: decl.clone() }
    );
    // The first registration survives the failed second one.
    assert_eq!(index.get_param(&env, &decl), Some(&1));
}

#[test]
fn duplicate_against_a_committed_module_is_rejected() {
    let mut env = Environment::new();
    let mut index = PersistentIndex::new();
    compile_module(&mut env, &mut index, "A", &[("A.x", 1)]);

    env.begin_module(Name::root("B")).unwrap();
    assert_eq!(
        index.set_param(Name::from_dotted("A.x"), 9).unwrap_err(),
        IndexError::DuplicateDeclaration {
            name: Name::from_dotted("A.x")
        }
    );
}

#[test]
fn distinct_names_both_register() {
    let mut env = Environment::new();
    let mut index = PersistentIndex::new();
    env.begin_module(Name::root("A")).unwrap();
    index.set_param(Name::from_dotted("A.x"), 1).unwrap();
    index.set_param(Name::from_dotted("A.y"), 2).unwrap();
    assert_eq!(index.pending_len(), 2);
}

#[test]
fn recommit_is_rejected() {
    let mut env = Environment::new();
    let mut index = PersistentIndex::new();
    let id = compile_module(&mut env, &mut index, "A", &[("A.x", 1)]);
    assert_eq!(
        index.commit_module(id).unwrap_err(),
        IndexError::ModuleRecommitted { module: id }
    );
}

#[test]
fn import_installs_verbatim_and_is_queryable() {
    let mut env = Environment::new();
    let id = env
        .import_module(
            Name::root("P"),
            vec![
                (Name::from_dotted("P.a"), Ty::io_unit()),
                (Name::from_dotted("P.b"), Ty::io_unit()),
            ],
        )
        .unwrap();

    let mut index: PersistentIndex<u32> = PersistentIndex::new();
    let entries = vec![
        Entry {
            name: Name::from_dotted("P.a"),
            value: 1,
        },
        Entry {
            name: Name::from_dotted("P.b"),
            value: 2,
        },
    ];
    index.import_module(id, entries.clone()).unwrap();

    assert_eq!(index.get_param(&env, &Name::from_dotted("P.b")), Some(&2));
    assert_eq!(index.exported_entries(id).unwrap().to_vec(), entries);
}

#[test]
fn import_collision_is_rejected() {
    let mut env = Environment::new();
    let mut index = PersistentIndex::new();
    let a = compile_module(&mut env, &mut index, "A", &[("A.x", 1)]);

    let b = env.import_module(Name::root("B"), vec![]).unwrap();
    assert_ne!(a, b);
    let err = index
        .import_module(
            b,
            vec![Entry {
                name: Name::from_dotted("A.x"),
                value: 5,
            }],
        )
        .unwrap_err();
    assert_eq!(
        err,
        IndexError::DuplicateDeclaration {
            name: Name::from_dotted("A.x")
        }
    );
}

#[test]
fn import_into_an_occupied_slot_is_rejected() {
    let mut env = Environment::new();
    let mut index = PersistentIndex::new();
    let id = compile_module(&mut env, &mut index, "A", &[("A.x", 1)]);
    assert_eq!(
        index.import_module(id, vec![]).unwrap_err(),
        IndexError::ModuleRecommitted { module: id }
    );
}
