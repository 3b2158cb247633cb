//! Boolean predicates over component signatures.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use bento_foundation::{Component, ComponentType};

use crate::signature::Signature;
use crate::storage::{ContainerHandle, ContainerIndex};

/// A predicate over which component types an entity carries.
///
/// A filter is evaluated two ways: against one signature (does this entity
/// match?) and against the storage's inverted index (which containers
/// match?). Both evaluations agree for every live container.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Filter {
    /// The component type is present.
    Has(ComponentType),
    /// Both operands match.
    And(Box<Filter>, Box<Filter>),
    /// At least one operand matches.
    Or(Box<Filter>, Box<Filter>),
    /// The operand does not match.
    Not(Box<Filter>),
}

impl Filter {
    /// Matches entities that carry a `T`.
    #[must_use]
    pub fn has<T: Component>() -> Self {
        Self::Has(T::component_type())
    }

    /// Matches entities that carry the given component type.
    #[must_use]
    pub fn component(component: ComponentType) -> Self {
        Self::Has(component)
    }

    /// Conjunction.
    #[must_use]
    pub fn and(self, other: Filter) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    /// Disjunction.
    #[must_use]
    pub fn or(self, other: Filter) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Negation.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Tests a single signature.
    #[must_use]
    pub fn matches(&self, signature: &Signature) -> bool {
        match self {
            Self::Has(component) => signature.contains(*component),
            Self::And(a, b) => a.matches(signature) && b.matches(signature),
            Self::Or(a, b) => a.matches(signature) || b.matches(signature),
            Self::Not(inner) => !inner.matches(signature),
        }
    }

    /// Returns the containers in `index` whose signatures match.
    ///
    /// Negation is taken relative to every container the index knows about.
    #[must_use]
    pub fn groups(&self, index: &ContainerIndex) -> BTreeSet<ContainerHandle> {
        match self {
            Self::Has(component) => index.get(component).cloned().unwrap_or_default(),
            Self::And(a, b) => {
                let left = a.groups(index);
                if left.is_empty() {
                    return left;
                }
                left.intersection(&b.groups(index)).copied().collect()
            }
            Self::Or(a, b) => {
                let mut left = a.groups(index);
                left.extend(b.groups(index));
                left
            }
            Self::Not(inner) => {
                let excluded = inner.groups(index);
                index
                    .values()
                    .flatten()
                    .copied()
                    .filter(|handle| !excluded.contains(handle))
                    .collect()
            }
        }
    }
}

impl From<ComponentType> for Filter {
    fn from(component: ComponentType) -> Self {
        Self::Has(component)
    }
}

impl BitAnd for Filter {
    type Output = Filter;

    fn bitand(self, rhs: Filter) -> Filter {
        self.and(rhs)
    }
}

impl BitOr for Filter {
    type Output = Filter;

    fn bitor(self, rhs: Filter) -> Filter {
        self.or(rhs)
    }
}

impl Not for Filter {
    type Output = Filter;

    fn not(self) -> Filter {
        self.negate()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Has(component) => write!(f, "{component}"),
            Self::And(a, b) => write!(f, "({a} & {b})"),
            Self::Or(a, b) => write!(f, "({a} | {b})"),
            Self::Not(inner) => write!(f, "!{inner}"),
        }
    }
}
