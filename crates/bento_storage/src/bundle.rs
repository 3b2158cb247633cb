//! Owned, type-keyed component maps and the [`Bundle`] conversion trait.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use bento_foundation::{Component, ComponentType};

use crate::column::{Column, column_mismatch};
use crate::signature::Signature;

/// Object-safe view of a single component value.
pub(crate) trait AnyComponent: Any + Send + Sync {
    fn tag(&self) -> ComponentType;

    fn clone_box(&self) -> Box<dyn AnyComponent>;

    /// Creates an empty column able to hold values of this type.
    fn new_column(&self, capacity: usize) -> Box<dyn Column>;

    fn push_into(self: Box<Self>, column: &mut dyn Column);

    fn write_into(self: Box<Self>, column: &mut dyn Column, row: usize);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn as_debug(&self) -> &dyn fmt::Debug;
}

impl<T: Component> AnyComponent for T {
    fn tag(&self) -> ComponentType {
        <T as Component>::component_type()
    }

    fn clone_box(&self) -> Box<dyn AnyComponent> {
        Box::new(self.clone())
    }

    fn new_column(&self, capacity: usize) -> Box<dyn Column> {
        Box::new(Vec::<T>::with_capacity(capacity))
    }

    fn push_into(self: Box<Self>, column: &mut dyn Column) {
        match column.as_any_mut().downcast_mut::<Vec<T>>() {
            Some(values) => values.push(*self),
            None => column_mismatch::<T>(),
        }
    }

    fn write_into(self: Box<Self>, column: &mut dyn Column, row: usize) {
        match column.as_any_mut().downcast_mut::<Vec<T>>() {
            Some(values) => values[row] = *self,
            None => column_mismatch::<T>(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn as_debug(&self) -> &dyn fmt::Debug {
        self
    }
}

/// An owned map from component type to component value.
///
/// Holds at most one value per type; inserting a second value of the same
/// type replaces the first. Iteration is in tag order, which is also the
/// column order of the container for [`ComponentSet::signature`].
#[derive(Default)]
pub struct ComponentSet {
    components: BTreeMap<ComponentType, Box<dyn AnyComponent>>,
}

impl ComponentSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ComponentSet::insert`].
    #[must_use]
    pub fn with<T: Component>(mut self, value: T) -> Self {
        self.insert(value);
        self
    }

    /// Inserts a value, returning the value it replaced.
    pub fn insert<T: Component>(&mut self, value: T) -> Option<T> {
        let previous = self
            .components
            .insert(T::component_type(), Box::new(value))?;
        previous.into_any().downcast::<T>().ok().map(|boxed| *boxed)
    }

    /// Returns the value of type `T`, if present.
    #[must_use]
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.components
            .get(&T::component_type())?
            .as_any()
            .downcast_ref()
    }

    /// Returns a mutable reference to the value of type `T`, if present.
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .get_mut(&T::component_type())?
            .as_any_mut()
            .downcast_mut()
    }

    /// Removes and returns the value of type `T`, if present.
    pub fn remove<T: Component>(&mut self) -> Option<T> {
        let boxed = self.components.remove(&T::component_type())?;
        boxed.into_any().downcast::<T>().ok().map(|boxed| *boxed)
    }

    /// Checks if a value of the given type is present.
    #[must_use]
    pub fn contains(&self, component: ComponentType) -> bool {
        self.components.contains_key(&component)
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if the set holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterates the component types present, in tag order.
    pub fn types(&self) -> impl Iterator<Item = ComponentType> + '_ {
        self.components.keys().copied()
    }

    /// Returns the signature formed by the types present.
    #[must_use]
    pub fn signature(&self) -> Signature {
        // BTreeMap keys are already sorted and unique.
        self.types().collect()
    }

    /// Moves every value of `other` into this set, replacing values of the
    /// same type.
    pub fn merge(&mut self, other: ComponentSet) {
        self.components.extend(other.components);
    }

    /// Removes the values of the given types and returns them as a new set.
    pub fn split_off(&mut self, types: &[ComponentType]) -> ComponentSet {
        let mut removed = ComponentSet::new();
        for component in types {
            if let Some(value) = self.components.remove(component) {
                removed.components.insert(*component, value);
            }
        }
        removed
    }

    pub(crate) fn insert_boxed(&mut self, value: Box<dyn AnyComponent>) {
        self.components.insert(value.tag(), value);
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (ComponentType, &dyn AnyComponent)> {
        self.components
            .iter()
            .map(|(component, value)| (*component, value.as_ref()))
    }

    pub(crate) fn into_entries(self) -> impl Iterator<Item = (ComponentType, Box<dyn AnyComponent>)> {
        self.components.into_iter()
    }
}

impl Clone for ComponentSet {
    fn clone(&self) -> Self {
        Self {
            components: self
                .components
                .iter()
                .map(|(component, value)| (*component, value.clone_box()))
                .collect(),
        }
    }
}

impl fmt::Debug for ComponentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.components
                    .iter()
                    .map(|(component, value)| (component.short_name(), value.as_debug())),
            )
            .finish()
    }
}

/// Anything that can be turned into a [`ComponentSet`].
///
/// Implemented for [`ComponentSet`], the unit type (no components), and
/// tuples of up to eight components. When a tuple holds two values of the
/// same type, the later one wins.
pub trait Bundle {
    /// Converts into an owned component map.
    fn into_component_set(self) -> ComponentSet;
}

impl Bundle for ComponentSet {
    fn into_component_set(self) -> ComponentSet {
        self
    }
}

impl Bundle for () {
    fn into_component_set(self) -> ComponentSet {
        ComponentSet::new()
    }
}

macro_rules! impl_bundle {
    ($($name:ident),+) => {
        impl<$($name: Component),+> Bundle for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_component_set(self) -> ComponentSet {
                let ($($name,)+) = self;
                let mut set = ComponentSet::new();
                $(set.insert($name);)+
                set
            }
        }
    };
}

impl_bundle!(A);
impl_bundle!(A, B);
impl_bundle!(A, B, C);
impl_bundle!(A, B, C, D);
impl_bundle!(A, B, C, D, E);
impl_bundle!(A, B, C, D, E, F);
impl_bundle!(A, B, C, D, E, F, G);
impl_bundle!(A, B, C, D, E, F, G, H);
