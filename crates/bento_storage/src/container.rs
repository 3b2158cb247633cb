//! Containers: dense per-signature tables of entities.

use std::collections::HashMap;
use std::fmt;

use bento_foundation::{Component, Entity};

use crate::bundle::ComponentSet;
use crate::column::{self, Column};
use crate::signature::Signature;

/// All entities that carry exactly one signature, stored column-wise.
///
/// Row `i` of every column belongs to `entities()[i]`. Removing a row moves
/// the last row into the hole, so row order is not stable across removals.
pub struct Container {
    signature: Signature,
    entities: Vec<Entity>,
    /// One column per type in `signature`, in rank order.
    columns: Vec<Box<dyn Column>>,
    index: HashMap<Entity, usize>,
}

impl Container {
    /// `prototype` supplies one value per signature type, used only to build
    /// the empty columns.
    pub(crate) fn new(signature: Signature, prototype: &ComponentSet, capacity: usize) -> Self {
        debug_assert_eq!(signature, prototype.signature());
        let columns = prototype
            .entries()
            .map(|(_, value)| value.new_column(capacity))
            .collect();
        Self {
            signature,
            entities: Vec::with_capacity(capacity),
            columns,
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Appends a row. The key set of `components` must equal the signature.
    pub(crate) fn add(&mut self, entity: Entity, components: ComponentSet) {
        debug_assert_eq!(self.signature, components.signature());
        debug_assert!(!self.index.contains_key(&entity));

        let row = self.entities.len();
        for ((_, value), column) in components.into_entries().zip(self.columns.iter_mut()) {
            value.push_into(column.as_mut());
        }
        self.entities.push(entity);
        self.index.insert(entity, row);
    }

    /// Removes the entity's row by swap-and-pop, returning its values.
    pub(crate) fn remove(&mut self, entity: Entity) -> Option<ComponentSet> {
        let row = self.index.remove(&entity)?;

        let mut removed = ComponentSet::new();
        for column in &mut self.columns {
            removed.insert_boxed(column.swap_remove(row));
        }
        self.entities.swap_remove(row);

        // The former last row now lives at `row`.
        if let Some(&moved) = self.entities.get(row) {
            self.index.insert(moved, row);
        }
        Some(removed)
    }

    /// Overwrites values in place. Types outside the signature are ignored.
    ///
    /// Returns false if the entity is not stored here.
    pub(crate) fn update(&mut self, entity: Entity, components: ComponentSet) -> bool {
        let Some(&row) = self.index.get(&entity) else {
            return false;
        };
        for (component, value) in components.into_entries() {
            if let Some(rank) = self.signature.position(component) {
                value.write_into(self.columns[rank].as_mut(), row);
            }
        }
        true
    }

    pub(crate) fn row(&self, entity: Entity) -> Option<usize> {
        self.index.get(&entity).copied()
    }

    pub(crate) fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        let row = self.row(entity)?;
        let rank = self.signature.position(T::component_type())?;
        column::typed_mut::<T>(self.columns[rank].as_mut())?.get_mut(row)
    }

    /// Splits the borrow so the entity list can be read while `T`'s column is
    /// written.
    pub(crate) fn entities_and_column_mut<T: Component>(
        &mut self,
    ) -> Option<(&[Entity], &mut [T])> {
        let rank = self.signature.position(T::component_type())?;
        let values = column::typed_mut::<T>(self.columns[rank].as_mut())?;
        Some((&self.entities, values.as_mut_slice()))
    }

    /// Returns the signature shared by every entity in this container.
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Returns the entities in row order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the container holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Checks if the entity is stored here.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    /// Returns the whole column for `T`, aligned with [`Container::entities`].
    #[must_use]
    pub fn column<T: Component>(&self) -> Option<&[T]> {
        let rank = self.signature.position(T::component_type())?;
        column::typed::<T>(self.columns[rank].as_ref())
    }

    /// Returns the entity's value of type `T`.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        let row = self.row(entity)?;
        self.column::<T>()?.get(row)
    }

    /// Clones every value in the entity's row.
    #[must_use]
    pub fn components(&self, entity: Entity) -> Option<ComponentSet> {
        let row = self.row(entity)?;
        let mut set = ComponentSet::new();
        for column in &self.columns {
            set.insert_boxed(column.clone_row(row));
        }
        Some(set)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("signature", &self.signature)
            .field("len", &self.entities.len())
            .finish()
    }
}
