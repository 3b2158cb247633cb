//! Filtered, read-only views of a storage.

use std::collections::BTreeSet;

use bento_foundation::Entity;

use crate::container::Container;
use crate::filter::Filter;
use crate::query::{Query, Select};
use crate::storage::{ContainerHandle, Storage};

/// A storage seen through a filter.
///
/// Views cache nothing: every call re-evaluates the filter against the
/// storage's current indices.
#[derive(Clone, Debug)]
pub struct View<'s> {
    storage: &'s Storage,
    filter: Filter,
}

impl<'s> View<'s> {
    /// Creates a view of `storage` restricted to `filter`.
    #[must_use]
    pub fn new(storage: &'s Storage, filter: Filter) -> Self {
        Self { storage, filter }
    }

    /// Narrows this view: the result matches both `filter` and this view's
    /// filter.
    #[must_use]
    pub fn view(&self, filter: Filter) -> View<'s> {
        View::new(self.storage, filter & self.filter.clone())
    }

    /// Returns the underlying storage.
    #[must_use]
    pub fn storage(&self) -> &'s Storage {
        self.storage
    }

    /// Returns the filter.
    #[must_use]
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    fn handles(&self) -> BTreeSet<ContainerHandle> {
        self.filter.groups(self.storage.container_index())
    }

    /// Iterates the containers whose signatures match.
    pub fn containers(&self) -> impl Iterator<Item = &'s Container> + use<'s> {
        let storage = self.storage;
        self.handles()
            .into_iter()
            .filter_map(move |handle| storage.container(handle))
    }

    /// Iterates the matching entities.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + use<'s> {
        self.containers()
            .flat_map(|container| container.entities().iter().copied())
    }

    /// Returns the number of matching entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers().map(Container::len).sum()
    }

    /// Returns true if no entity matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        // Live containers are never empty.
        self.containers().next().is_none()
    }

    /// Checks if a tracked entity matches.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.storage.contains(entity) && self.storage.matches(entity, &self.filter)
    }

    /// Iterates the matching entities that hold all of `Q`'s types.
    ///
    /// Matching containers that lack one of `Q`'s types are skipped.
    #[must_use]
    pub fn select<Q: Query>(&self) -> Select<'s, Q> {
        Select::new(self.containers().collect())
    }
}
