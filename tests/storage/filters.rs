//! Integration tests for filters
//!
//! Tests the filter algebra over a population with signatures {A}, {B},
//! {A, B}, and {}.

use std::collections::BTreeSet;

use bento_foundation::{Component, Entity};
use bento_storage::{Filter, Storage};

use crate::common::{A, B};

struct Population {
    storage: Storage,
    only_a: Entity,
    only_b: Entity,
    both: Entity,
    none: Entity,
}

fn population() -> Population {
    let mut storage = Storage::new();
    let only_a = storage.create((A(1),));
    let only_b = storage.create((B(2),));
    let both = storage.create((A(3), B(4)));
    let none = storage.create(());
    Population {
        storage,
        only_a,
        only_b,
        both,
        none,
    }
}

fn matching(storage: &Storage, filter: Filter) -> BTreeSet<Entity> {
    storage.view(filter).entities().collect()
}

#[test]
fn and_yields_intersection() {
    let p = population();
    let hits = matching(&p.storage, Filter::has::<A>() & Filter::has::<B>());
    assert_eq!(hits, BTreeSet::from([p.both]));
}

#[test]
fn or_yields_union() {
    let p = population();
    let hits = matching(&p.storage, Filter::has::<A>() | Filter::has::<B>());
    assert_eq!(hits, BTreeSet::from([p.only_a, p.only_b, p.both]));
}

#[test]
fn not_excludes_untracked() {
    let p = population();
    let hits = matching(&p.storage, !Filter::has::<A>());
    assert_eq!(hits, BTreeSet::from([p.only_b]));
    assert!(!hits.contains(&p.none));
}

#[test]
fn single_test_agrees_with_group_test() {
    let p = population();
    let filters = [
        Filter::has::<A>(),
        Filter::has::<A>().and(Filter::has::<B>()),
        Filter::has::<A>().or(Filter::has::<B>()),
        Filter::has::<A>().negate(),
        Filter::has::<B>().negate().and(Filter::has::<A>()),
    ];
    for filter in filters {
        let grouped = matching(&p.storage, filter.clone());
        for entity in [p.only_a, p.only_b, p.both] {
            assert_eq!(
                p.storage.matches(entity, &filter),
                grouped.contains(&entity),
                "{filter} on {entity}"
            );
        }
    }
}

#[test]
fn untracked_entity_matches_against_empty_signature() {
    let p = population();
    assert!(p.storage.matches(p.none, &!Filter::has::<A>()));
    assert!(!p.storage.matches(p.none, &Filter::has::<A>()));
}

#[test]
fn filter_from_component_type() {
    let p = population();
    let filter = Filter::from(A::component_type());
    assert_eq!(filter, Filter::component(A::component_type()));
    assert_eq!(matching(&p.storage, filter).len(), 2);
}

#[test]
fn filters_track_live_indices() {
    let mut p = population();
    let filter = Filter::has::<A>() & Filter::has::<B>();
    assert_eq!(p.storage.view(filter.clone()).len(), 1);

    p.storage.destroy(p.both).unwrap();
    assert!(p.storage.view(filter.clone()).is_empty());

    p.storage.set(p.only_a, (B(9),));
    assert_eq!(matching(&p.storage, filter), BTreeSet::from([p.only_a]));
}
