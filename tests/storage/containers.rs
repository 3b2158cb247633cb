//! Integration tests for containers
//!
//! Tests container identity, column alignment, and slot reuse as seen
//! through the public storage API.

use bento_foundation::Component;
use bento_storage::{ContainerHandle, Signature, Storage};

use crate::common::{Name, Position, Velocity, pos, vel};

#[test]
fn one_container_per_signature() {
    let mut storage = Storage::new();
    storage.create((pos(0, 0),));
    storage.create((pos(1, 1),));
    storage.create((vel(0, 0), pos(2, 2)));
    storage.create((pos(3, 3), vel(1, 1)));

    assert_eq!(storage.container_count(), 2);
    let signatures: Vec<&Signature> = storage.containers().map(|c| c.signature()).collect();
    assert_ne!(signatures[0], signatures[1]);
}

#[test]
fn columns_are_aligned_with_entities() {
    let mut storage = Storage::new();
    let ids: Vec<_> = (0..6).map(|i| storage.create((pos(i, 0), vel(0, i)))).collect();
    storage.destroy(ids[1]).unwrap();
    storage.destroy(ids[4]).unwrap();

    let signature = Signature::from_types(vec![
        Position::component_type(),
        Velocity::component_type(),
    ]);
    let container = storage.container_for(&signature).unwrap();
    let positions = container.column::<Position>().unwrap();
    let velocities = container.column::<Velocity>().unwrap();

    assert_eq!(container.len(), 4);
    assert_eq!(positions.len(), container.entities().len());
    assert_eq!(velocities.len(), container.entities().len());
    for (row, entity) in container.entities().iter().enumerate() {
        assert_eq!(container.get::<Position>(*entity), Some(&positions[row]));
        assert_eq!(positions[row].x, velocities[row].dy);
    }
    assert!(container.column::<Name>().is_none());
}

#[test]
fn container_components_are_copies() {
    let mut storage = Storage::new();
    let e = storage.create((Name("original".into()),));
    let container = storage.containers().next().unwrap();
    let mut copy = container.components(e).unwrap();
    copy.insert(Name("changed".into()));

    assert_eq!(storage.get::<Name>(e).unwrap(), &Name("original".into()));
}

#[test]
fn handles_resolve_to_live_containers() {
    let mut storage = Storage::new();
    let e = storage.create((pos(0, 0),));
    let index = storage.container_index();
    let handles: Vec<ContainerHandle> = index[&Position::component_type()].iter().copied().collect();
    assert_eq!(handles.len(), 1);
    assert!(storage.container(handles[0]).unwrap().contains(e));

    storage.destroy(e).unwrap();
    assert!(storage.container(handles[0]).is_none());
}

#[test]
fn select_mut_touches_every_holder() {
    let mut storage = Storage::new();
    let a = storage.create((pos(0, 0),));
    let b = storage.create((pos(0, 0), vel(1, 1)));
    let c = storage.create((vel(5, 5),));

    let mut touched = 0;
    for (_, velocity) in storage.select_mut::<Velocity>() {
        velocity.dx *= 10;
        touched += 1;
    }

    assert_eq!(touched, 2);
    assert_eq!(storage.get::<Velocity>(b).unwrap(), &vel(10, 1));
    assert_eq!(storage.get::<Velocity>(c).unwrap(), &vel(50, 5));
    assert!(!storage.has::<Velocity>(a));
}
