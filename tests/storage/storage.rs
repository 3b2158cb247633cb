//! Integration tests for storage operations
//!
//! Tests create, set, delete, destroy, reads, and the end-to-end scenario.

use bento_foundation::{Component, Entity, ErrorKind};
use bento_storage::{ComponentSet, Signature, Storage, StorageConfig};
use proptest::prelude::*;

use crate::common::{Name, Position, Velocity, pos, vel};

// =============================================================================
// Round Trips
// =============================================================================

#[test]
fn set_then_read_back() {
    let mut storage = Storage::new();
    let e = storage.create_empty();
    storage.set(e, (pos(1, 2), vel(3, 4), Name("probe".into())));

    let components = storage.components(e).unwrap();
    assert_eq!(components.len(), 3);
    assert_eq!(components.get::<Position>(), Some(&pos(1, 2)));
    assert_eq!(components.get::<Velocity>(), Some(&vel(3, 4)));
    assert_eq!(components.get::<Name>(), Some(&Name("probe".into())));
    assert_eq!(storage.signature(e).unwrap(), &components.signature());
}

#[test]
fn create_from_component_set() {
    let mut storage = Storage::new();
    let set = ComponentSet::new().with(pos(0, 0)).with(Name("set".into()));
    let e = storage.create(set);

    assert!(storage.has::<Position>(e));
    assert!(storage.has::<Name>(e));
    assert!(!storage.has::<Velocity>(e));
}

proptest! {
    #[test]
    fn round_trip_any_values(x in any::<i32>(), y in any::<i32>(), name in ".{0,16}", with_velocity in any::<bool>()) {
        let mut storage = Storage::new();
        let e = storage.create_empty();
        let mut set = ComponentSet::new().with(pos(x, y)).with(Name(name.clone()));
        if with_velocity {
            set.insert(vel(y, x));
        }
        let expected = set.signature();
        storage.set(e, set);

        prop_assert_eq!(storage.signature(e).unwrap(), &expected);
        prop_assert_eq!(storage.get::<Position>(e).unwrap(), &pos(x, y));
        prop_assert_eq!(storage.get::<Name>(e).unwrap(), &Name(name));
        prop_assert_eq!(storage.has::<Velocity>(e), with_velocity);
    }
}

// =============================================================================
// Migration
// =============================================================================

#[test]
fn migration_preserves_data() {
    let mut storage = Storage::new();
    let e = storage.create_empty();

    storage.set(e, (pos(1, 1),));
    storage.set(e, (vel(2, 2),));
    let components = storage.components(e).unwrap();
    assert_eq!(components.len(), 2);
    assert_eq!(components.get::<Position>(), Some(&pos(1, 1)));
    assert_eq!(components.get::<Velocity>(), Some(&vel(2, 2)));

    storage.delete(e, &[Position::component_type()]).unwrap();
    let components = storage.components(e).unwrap();
    assert_eq!(components.len(), 1);
    assert_eq!(components.get::<Velocity>(), Some(&vel(2, 2)));
    assert_eq!(
        storage.signature(e).unwrap(),
        &Signature::from_types(vec![Velocity::component_type()])
    );
}

#[test]
fn migration_keeps_neighbours_intact() {
    let mut storage = Storage::new();
    let movers: Vec<Entity> = (0..4).map(|i| storage.create((pos(i, i), vel(1, 1)))).collect();

    // Moving the first mover out swaps the last one into its row.
    storage.delete(movers[0], &[Velocity::component_type()]).unwrap();

    for (i, e) in movers.iter().enumerate().skip(1) {
        let i = i32::try_from(i).unwrap();
        assert_eq!(storage.get::<Position>(*e).unwrap(), &pos(i, i));
        assert_eq!(storage.get::<Velocity>(*e).unwrap(), &vel(1, 1));
    }
    assert_eq!(storage.get::<Position>(movers[0]).unwrap(), &pos(0, 0));
    assert_eq!(storage.container_count(), 2);
}

#[test]
fn set_overwrites_and_extends_at_once() {
    let mut storage = Storage::new();
    let e = storage.create((pos(0, 0),));
    storage.set(e, (pos(9, 9), vel(1, 0)));

    assert_eq!(storage.get::<Position>(e).unwrap(), &pos(9, 9));
    assert_eq!(storage.get::<Velocity>(e).unwrap(), &vel(1, 0));
    assert_eq!(storage.container_count(), 1);
}

// =============================================================================
// Destruction
// =============================================================================

#[test]
fn swap_remove_correctness() {
    let mut storage = Storage::new();
    let ids: Vec<Entity> = (0..5).map(|i| storage.create((pos(i, -i), vel(i, i)))).collect();
    let before = storage.len();

    let destroyed = storage.destroy(ids[2]).unwrap();
    assert_eq!(destroyed.get::<Position>(), Some(&pos(2, -2)));
    assert_eq!(storage.len(), before - 1);

    for (i, e) in ids.iter().enumerate() {
        let i = i32::try_from(i).unwrap();
        if i == 2 {
            assert!(!storage.contains(*e));
            continue;
        }
        assert_eq!(storage.get::<Position>(*e).unwrap(), &pos(i, -i));
        assert_eq!(storage.get::<Velocity>(*e).unwrap(), &vel(i, i));
    }
}

#[test]
fn emptying_removes_grouping() {
    let mut storage = Storage::new();
    let common = storage.create((pos(0, 0),));
    let unique = storage.create((pos(1, 1), Name("only".into())));
    assert_eq!(storage.container_count(), 2);

    storage.destroy(unique).unwrap();

    assert_eq!(storage.container_count(), 1);
    assert!(storage.containers().all(|c| !c.is_empty()));
    assert_eq!(storage.select::<(Name,)>().count(), 0);
    let all: Vec<Entity> = storage.select::<()>().map(|(e, ())| e).collect();
    assert_eq!(all, vec![common]);
    assert!(!storage.container_index().contains_key(&Name::component_type()));
}

#[test]
fn destroy_twice_errors() {
    let mut storage = Storage::new();
    let e = storage.create((pos(0, 0),));
    storage.destroy(e).unwrap();
    let err = storage.destroy(e).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EntityNotFound(id) if id == e));
}

// =============================================================================
// Reads and Errors
// =============================================================================

#[test]
fn strict_missing_entity_policy() {
    let mut storage = Storage::new();
    let ghost = storage.create_empty();

    assert!(storage.destroy(ghost).unwrap_err().is_entity_error());
    assert!(
        storage
            .delete(ghost, &[Position::component_type()])
            .unwrap_err()
            .is_entity_error()
    );
    assert!(storage.components(ghost).unwrap_err().is_entity_error());
    assert!(storage.signature(ghost).unwrap_err().is_entity_error());
    assert!(storage.get::<Position>(ghost).unwrap_err().is_entity_error());
    assert!(storage.get_mut::<Position>(ghost).unwrap_err().is_entity_error());
    assert!(
        storage
            .get_many::<(Position,)>(ghost)
            .unwrap_err()
            .is_entity_error()
    );
}

#[test]
fn missing_component_names_the_type() {
    let mut storage = Storage::new();
    let e = storage.create((pos(0, 0),));
    let err = storage.get::<Name>(e).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::ComponentNotFound { entity, component }
            if entity == e && component == Name::component_type()
    ));
}

#[test]
fn entities_lists_every_tracked_id() {
    let mut storage = Storage::new();
    let mut created: Vec<Entity> = vec![
        storage.create((pos(0, 0),)),
        storage.create((vel(0, 0),)),
        storage.create((pos(0, 0), vel(0, 0))),
    ];
    storage.create(());

    let mut listed: Vec<Entity> = storage.entities().collect();
    created.sort();
    listed.sort();
    assert_eq!(listed, created);
}

#[test]
fn configured_storage_behaves_the_same() {
    let mut storage = Storage::with_config(StorageConfig::minimal());
    let e = storage.create((pos(1, 1),));
    assert_eq!(storage.get::<Position>(e).unwrap(), &pos(1, 1));
    assert_eq!(storage.config(), &StorageConfig::minimal());
    assert_eq!(storage.command_buffer().len(), 0);
}

// =============================================================================
// End-to-End Scenario
// =============================================================================

#[test]
fn end_to_end_scenario() {
    let mut storage = Storage::new();
    let first = storage.create_empty();
    let second = storage.create_empty();
    let third = storage.create_empty();

    storage.set(first, (pos(1, 1),));
    storage.set(second, (pos(2, 2), vel(1, 0)));

    let mut with_position: Vec<(Entity, Position)> = storage
        .select::<(Position,)>()
        .map(|(e, (p,))| (e, p.clone()))
        .collect();
    with_position.sort_by_key(|(e, _)| *e);
    let mut expected = vec![(first, pos(1, 1)), (second, pos(2, 2))];
    expected.sort_by_key(|(e, _)| *e);
    assert_eq!(with_position, expected);

    let both: Vec<Entity> = storage
        .select::<(Position, Velocity)>()
        .map(|(e, _)| e)
        .collect();
    assert_eq!(both, vec![second]);

    assert_eq!(storage.select::<()>().count(), 2);
    assert!(!storage.contains(third));
}
