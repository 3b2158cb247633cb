//! Typed, lazy reads over containers.

use std::vec;

use bento_foundation::{Component, ComponentType, Entity};

use crate::container::Container;

/// A set of component types read together, one shared reference each.
///
/// Implemented for `()` (no components, matches every container) and for
/// tuples of up to eight component types.
pub trait Query {
    /// What one row yields.
    type Item<'a>;

    /// Column slices borrowed from one container.
    type Fetch<'a>: Copy;

    /// The component types this query reads.
    fn component_types() -> Vec<ComponentType>;

    /// Borrows the needed columns, or `None` if the container lacks one.
    fn fetch(container: &Container) -> Option<Self::Fetch<'_>>;

    /// Reads one row out of fetched columns.
    fn item<'a>(fetch: Self::Fetch<'a>, row: usize) -> Self::Item<'a>;
}

impl Query for () {
    type Item<'a> = ();
    type Fetch<'a> = ();

    fn component_types() -> Vec<ComponentType> {
        Vec::new()
    }

    fn fetch(_container: &Container) -> Option<Self::Fetch<'_>> {
        Some(())
    }

    fn item<'a>(_fetch: Self::Fetch<'a>, _row: usize) -> Self::Item<'a> {}
}

macro_rules! impl_query {
    ($($name:ident),+) => {
        impl<$($name: Component),+> Query for ($($name,)+) {
            type Item<'a> = ($(&'a $name,)+);
            type Fetch<'a> = ($(&'a [$name],)+);

            fn component_types() -> Vec<ComponentType> {
                vec![$($name::component_type()),+]
            }

            fn fetch(container: &Container) -> Option<Self::Fetch<'_>> {
                Some(($(container.column::<$name>()?,)+))
            }

            #[allow(non_snake_case)]
            fn item<'a>(fetch: Self::Fetch<'a>, row: usize) -> Self::Item<'a> {
                let ($($name,)+) = fetch;
                ($(&$name[row],)+)
            }
        }
    };
}

impl_query!(A);
impl_query!(A, B);
impl_query!(A, B, C);
impl_query!(A, B, C, D);
impl_query!(A, B, C, D, E);
impl_query!(A, B, C, D, E, F);
impl_query!(A, B, C, D, E, F, G);
impl_query!(A, B, C, D, E, F, G, H);

/// Lazy iterator of `(entity, item)` pairs across a set of containers.
///
/// Containers lacking one of `Q`'s types are skipped. Holds a shared borrow
/// of the storage for its whole life.
pub struct Select<'s, Q: Query> {
    containers: vec::IntoIter<&'s Container>,
    current: Option<(&'s [Entity], Q::Fetch<'s>)>,
    row: usize,
}

impl<'s, Q: Query> Select<'s, Q> {
    pub(crate) fn new(containers: Vec<&'s Container>) -> Self {
        Self {
            containers: containers.into_iter(),
            current: None,
            row: 0,
        }
    }
}

impl<'s, Q: Query> Iterator for Select<'s, Q> {
    type Item = (Entity, Q::Item<'s>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((entities, fetch)) = self.current {
                if let Some(&entity) = entities.get(self.row) {
                    let row = self.row;
                    self.row += 1;
                    return Some((entity, Q::item(fetch, row)));
                }
            }
            let container = self.containers.next()?;
            self.current = Q::fetch(container).map(|fetch| (container.entities(), fetch));
            self.row = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let current = self
            .current
            .map_or(0, |(entities, _)| entities.len() - self.row);
        let rest: usize = self.containers.as_slice().iter().map(|c| c.len()).sum();
        (0, Some(current + rest))
    }
}
