//! Type-erased dense columns.
//!
//! A container keeps one column per component type in its signature. Each
//! column is a plain `Vec<T>` behind the [`Column`] trait so that the
//! container can move rows around without knowing `T`.

use std::any::Any;

use bento_foundation::Component;

use crate::bundle::AnyComponent;

pub(crate) trait Column: Send + Sync {
    fn len(&self) -> usize;

    /// Removes `row`, moving the last row into its place.
    fn swap_remove(&mut self, row: usize) -> Box<dyn AnyComponent>;

    fn clone_row(&self, row: usize) -> Box<dyn AnyComponent>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> Column for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn swap_remove(&mut self, row: usize) -> Box<dyn AnyComponent> {
        Box::new(Vec::swap_remove(self, row))
    }

    fn clone_row(&self, row: usize) -> Box<dyn AnyComponent> {
        Box::new(self[row].clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub(crate) fn typed<T: Component>(column: &dyn Column) -> Option<&[T]> {
    column
        .as_any()
        .downcast_ref::<Vec<T>>()
        .map(Vec::as_slice)
}

pub(crate) fn typed_mut<T: Component>(column: &mut dyn Column) -> Option<&mut Vec<T>> {
    column.as_any_mut().downcast_mut::<Vec<T>>()
}

/// A column keyed by tag `T::component_type()` always holds `Vec<T>`; the
/// registry hands out exactly one tag per Rust type.
#[cold]
#[track_caller]
pub(crate) fn column_mismatch<T: Component>() -> ! {
    panic!(
        "column does not hold values of type {}",
        std::any::type_name::<T>()
    )
}
