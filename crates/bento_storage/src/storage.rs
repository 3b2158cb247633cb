//! The storage: every container plus the indices that find them.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use bento_foundation::{Component, ComponentType, Entity, Error, Result};
use tracing::{debug, trace};

use crate::bundle::{Bundle, ComponentSet};
use crate::command::CommandBuffer;
use crate::config::StorageConfig;
use crate::container::Container;
use crate::filter::Filter;
use crate::query::{Query, Select};
use crate::signature::Signature;
use crate::view::View;

/// Stable address of a container slot in a [`Storage`].
///
/// Slots are recycled once their container empties, so a handle is only
/// meaningful until the next structural change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerHandle(usize);

impl ContainerHandle {
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Returns the slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Inverted index from component type to the containers holding it.
pub type ContainerIndex = HashMap<ComponentType, BTreeSet<ContainerHandle>>;

/// Archetype storage for entities and their components.
///
/// Every entity with at least one component lives in exactly one
/// [`Container`], the one whose signature equals its component set. An
/// entity with no components is not tracked at all.
///
/// Reads borrow the storage immutably and writes borrow it mutably, so a
/// live [`Select`] or [`View`] rules out structural changes. Use a
/// [`CommandBuffer`] to record changes while iterating and apply them after.
#[derive(Debug, Default)]
pub struct Storage {
    config: StorageConfig,
    /// Container arena; `None` marks a recycled slot.
    containers: Vec<Option<Container>>,
    free_slots: Vec<ContainerHandle>,
    entity_to_container: HashMap<Entity, ContainerHandle>,
    ctype_to_containers: ContainerIndex,
    signature_to_container: HashMap<Signature, ContainerHandle>,
}

impl Storage {
    /// Creates an empty storage with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty storage with the given configuration.
    #[must_use]
    pub fn with_config(config: StorageConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    // --- Structural writes ---

    /// Creates an entity holding `bundle` and returns its id.
    ///
    /// An empty bundle mints an id without tracking anything.
    pub fn create(&mut self, bundle: impl Bundle) -> Entity {
        let entity = Entity::generate();
        self.set(entity, bundle);
        entity
    }

    /// Mints an id without storing anything.
    #[must_use]
    pub fn create_empty(&self) -> Entity {
        Entity::generate()
    }

    /// Removes an entity and returns its components.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the entity holds no components here.
    pub fn destroy(&mut self, entity: Entity) -> Result<ComponentSet> {
        self.remove_entity(entity)
            .ok_or_else(|| Error::entity_not_found(entity))
    }

    /// Adds or overwrites components on an entity.
    ///
    /// Values whose types the entity already has are overwritten in place.
    /// Any new type moves the entity to the container for its widened
    /// signature. On an untracked entity this behaves like [`Storage::create`]
    /// with a caller-chosen id.
    pub fn set(&mut self, entity: Entity, bundle: impl Bundle) {
        let components = bundle.into_component_set();
        if components.is_empty() {
            return;
        }

        if let Some(container) = self.container_of_mut(entity) {
            if components.types().all(|c| container.signature().contains(c)) {
                container.update(entity, components);
                return;
            }
        }

        let mut merged = match self.remove_entity(entity) {
            Some(current) => {
                trace!(%entity, "migrating entity to a wider container");
                current
            }
            None => ComponentSet::new(),
        };
        merged.merge(components);
        self.add_entity(entity, merged);
    }

    /// Removes the given component types from an entity and returns the
    /// removed values.
    ///
    /// Types the entity does not carry are ignored. Removing the last
    /// component leaves the entity untracked.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the entity holds no components here.
    pub fn delete(&mut self, entity: Entity, types: &[ComponentType]) -> Result<ComponentSet> {
        if !self.signature(entity)?.contains_any(types) {
            return Ok(ComponentSet::new());
        }

        let mut remaining = self
            .remove_entity(entity)
            .ok_or_else(|| Error::entity_not_found(entity))?;
        let deleted = remaining.split_off(types);
        if !remaining.is_empty() {
            trace!(%entity, "migrating entity to a narrower container");
            self.add_entity(entity, remaining);
        }
        Ok(deleted)
    }

    /// Removes every entity and container.
    pub fn clear(&mut self) {
        let entities = self.entity_to_container.len();
        self.containers.clear();
        self.free_slots.clear();
        self.entity_to_container.clear();
        self.ctype_to_containers.clear();
        self.signature_to_container.clear();
        debug!(entities, "cleared storage");
    }

    // --- Reads ---

    /// Checks if the entity holds any components here.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entity_to_container.contains_key(&entity)
    }

    /// Checks if the entity holds a `T`.
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.container_of(entity)
            .is_ok_and(|container| container.signature().contains(T::component_type()))
    }

    /// Returns the entity's signature.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the entity holds no components here.
    pub fn signature(&self, entity: Entity) -> Result<&Signature> {
        Ok(self.container_of(entity)?.signature())
    }

    /// Returns a copy of every component the entity holds.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the entity holds no components here.
    pub fn components(&self, entity: Entity) -> Result<ComponentSet> {
        self.container_of(entity)?
            .components(entity)
            .ok_or_else(|| Error::entity_not_found(entity))
    }

    /// Returns the entity's `T`.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the entity is untracked, or
    /// `ComponentNotFound` if it has no `T`.
    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T> {
        self.container_of(entity)?
            .get::<T>(entity)
            .ok_or_else(|| Error::component_not_found(entity, T::component_type()))
    }

    /// Returns the entity's `T` for in-place mutation.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the entity is untracked, or
    /// `ComponentNotFound` if it has no `T`.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T> {
        self.container_of_mut(entity)
            .ok_or_else(|| Error::entity_not_found(entity))?
            .get_mut::<T>(entity)
            .ok_or_else(|| Error::component_not_found(entity, T::component_type()))
    }

    /// Reads several components of one entity at once.
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the entity is untracked, or
    /// `ComponentNotFound` naming the first missing type.
    pub fn get_many<Q: Query>(&self, entity: Entity) -> Result<Q::Item<'_>> {
        let container = self.container_of(entity)?;
        let row = container
            .row(entity)
            .ok_or_else(|| Error::entity_not_found(entity))?;
        match Q::fetch(container) {
            Some(fetch) => Ok(Q::item(fetch, row)),
            None => {
                let missing = Q::component_types()
                    .into_iter()
                    .find(|c| !container.signature().contains(*c));
                Err(match missing {
                    Some(component) => Error::component_not_found(entity, component),
                    None => Error::internal(format!(
                        "columns for {} unavailable in {}",
                        entity,
                        container.signature()
                    )),
                })
            }
        }
    }

    /// Returns the number of tracked entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entity_to_container.len()
    }

    /// Returns true if no entity is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entity_to_container.is_empty()
    }

    /// Iterates every tracked entity, container by container.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.containers()
            .flat_map(|container| container.entities().iter().copied())
    }

    // --- Queries ---

    /// Tests an entity's current signature against a filter.
    ///
    /// An untracked entity is tested against the empty signature.
    #[must_use]
    pub fn matches(&self, entity: Entity, filter: &Filter) -> bool {
        match self.container_of(entity) {
            Ok(container) => filter.matches(container.signature()),
            Err(_) => filter.matches(&Signature::new()),
        }
    }

    /// Iterates every entity holding all of `Q`'s types.
    ///
    /// `Q = ()` visits every tracked entity.
    #[must_use]
    pub fn select<Q: Query>(&self) -> Select<'_, Q> {
        let types = Q::component_types();
        let containers = if types.is_empty() {
            self.containers().collect()
        } else {
            self.handles_with(&types)
                .into_iter()
                .filter_map(|handle| self.container(handle))
                .collect()
        };
        Select::new(containers)
    }

    /// Iterates every entity holding a `T`, yielding the `T` mutably.
    pub fn select_mut<T: Component>(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_ {
        self.containers
            .iter_mut()
            .flatten()
            .filter_map(Container::entities_and_column_mut::<T>)
            .flat_map(|(entities, values)| entities.iter().copied().zip(values.iter_mut()))
    }

    /// Returns a filtered, read-only view of this storage.
    #[must_use]
    pub fn view(&self, filter: Filter) -> View<'_> {
        View::new(self, filter)
    }

    // --- Deferred writes ---

    /// Returns an empty command buffer sized from the configuration.
    #[must_use]
    pub fn command_buffer(&self) -> CommandBuffer {
        CommandBuffer::with_capacity(self.config.command_capacity)
    }

    /// Runs `f` with read access and a fresh command buffer, then flushes
    /// the buffer.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while flushing. Commands before it
    /// stay applied.
    pub fn batch<R>(&mut self, f: impl FnOnce(&Storage, &mut CommandBuffer) -> R) -> Result<R> {
        let mut buffer = self.command_buffer();
        let output = f(self, &mut buffer);
        buffer.flush(self)?;
        Ok(output)
    }

    // --- Containers ---

    /// Iterates the live containers.
    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        self.containers.iter().flatten()
    }

    /// Returns the number of live containers.
    #[must_use]
    pub fn container_count(&self) -> usize {
        self.signature_to_container.len()
    }

    /// Returns the container in a slot, if the slot is live.
    #[must_use]
    pub fn container(&self, handle: ContainerHandle) -> Option<&Container> {
        self.containers.get(handle.index())?.as_ref()
    }

    /// Returns the container holding exactly `signature`, if any.
    #[must_use]
    pub fn container_for(&self, signature: &Signature) -> Option<&Container> {
        self.container(*self.signature_to_container.get(signature)?)
    }

    /// Returns the inverted index from component type to containers.
    #[must_use]
    pub fn container_index(&self) -> &ContainerIndex {
        &self.ctype_to_containers
    }

    // --- Internals ---

    fn container_of(&self, entity: Entity) -> Result<&Container> {
        self.entity_to_container
            .get(&entity)
            .and_then(|handle| self.container(*handle))
            .ok_or_else(|| Error::entity_not_found(entity))
    }

    fn container_of_mut(&mut self, entity: Entity) -> Option<&mut Container> {
        let handle = *self.entity_to_container.get(&entity)?;
        self.containers.get_mut(handle.index())?.as_mut()
    }

    /// Containers holding every type in `types`.
    fn handles_with(&self, types: &[ComponentType]) -> BTreeSet<ContainerHandle> {
        let mut sets: Vec<&BTreeSet<ContainerHandle>> = Vec::with_capacity(types.len());
        for component in types {
            match self.ctype_to_containers.get(component) {
                Some(set) => sets.push(set),
                None => return BTreeSet::new(),
            }
        }
        sets.sort_by_key(|set| set.len());
        let Some((smallest, rest)) = sets.split_first() else {
            return BTreeSet::new();
        };
        smallest
            .iter()
            .copied()
            .filter(|handle| rest.iter().all(|set| set.contains(handle)))
            .collect()
    }

    fn live_mut(&mut self, handle: ContainerHandle) -> &mut Container {
        match self.containers.get_mut(handle.index()) {
            Some(Some(container)) => container,
            _ => vacant_slot(handle),
        }
    }

    /// Adds a non-empty component set under its signature's container.
    fn add_entity(&mut self, entity: Entity, components: ComponentSet) {
        let signature = components.signature();
        let handle = match self.signature_to_container.get(&signature) {
            Some(&handle) => handle,
            None => self.open_container(signature, &components),
        };
        self.live_mut(handle).add(entity, components);
        self.entity_to_container.insert(entity, handle);
    }

    /// Takes the entity's row out of its container, closing the container
    /// if that emptied it.
    fn remove_entity(&mut self, entity: Entity) -> Option<ComponentSet> {
        let handle = self.entity_to_container.remove(&entity)?;
        let container = self.live_mut(handle);
        let removed = container.remove(entity);
        if container.is_empty() {
            self.close_container(handle);
        }
        removed
    }

    fn open_container(&mut self, signature: Signature, prototype: &ComponentSet) -> ContainerHandle {
        let container = Container::new(signature.clone(), prototype, self.config.container_capacity);
        let handle = match self.free_slots.pop() {
            Some(handle) => {
                self.containers[handle.index()] = Some(container);
                handle
            }
            None => {
                self.containers.push(Some(container));
                ContainerHandle(self.containers.len() - 1)
            }
        };

        for component in &signature {
            self.ctype_to_containers
                .entry(component)
                .or_default()
                .insert(handle);
        }
        debug!(slot = handle.index(), %signature, "opened container");
        self.signature_to_container.insert(signature, handle);
        handle
    }

    fn close_container(&mut self, handle: ContainerHandle) {
        let Some(container) = self
            .containers
            .get_mut(handle.index())
            .and_then(Option::take)
        else {
            return;
        };

        for component in container.signature() {
            if let Entry::Occupied(mut entry) = self.ctype_to_containers.entry(component) {
                entry.get_mut().remove(&handle);
                if entry.get().is_empty() {
                    entry.remove();
                }
            }
        }
        self.signature_to_container.remove(container.signature());
        self.free_slots.push(handle);
        debug!(slot = handle.index(), signature = %container.signature(), "closed container");
    }
}

/// The indices only ever hold handles of live containers.
#[cold]
#[track_caller]
fn vacant_slot(handle: ContainerHandle) -> ! {
    unreachable!("container slot {} is vacant", handle.index())
}
