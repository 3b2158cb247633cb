//! Signatures: the exact set of component types an entity carries.

use std::fmt;

use bento_foundation::ComponentType;

/// Represents a set of component types an entity has.
///
/// Members are kept sorted and de-duplicated, so two signatures built from
/// the same types in any order compare and hash equal.
#[derive(Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Signature {
    /// Component types, sorted by tag for consistent identity.
    types: Vec<ComponentType>,
}

impl Signature {
    /// Creates a new empty signature.
    #[must_use]
    pub fn new() -> Self {
        Self { types: Vec::new() }
    }

    /// Creates a signature from a list of component types.
    #[must_use]
    pub fn from_types(mut types: Vec<ComponentType>) -> Self {
        types.sort_unstable();
        types.dedup();
        Self { types }
    }

    /// Returns the component types in tag order.
    #[must_use]
    pub fn types(&self) -> &[ComponentType] {
        &self.types
    }

    /// Returns the number of component types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the signature has no component types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates the component types in tag order.
    pub fn iter(&self) -> impl Iterator<Item = ComponentType> + '_ {
        self.types.iter().copied()
    }

    /// Checks if this signature contains a component type.
    #[must_use]
    pub fn contains(&self, component: ComponentType) -> bool {
        self.position(component).is_some()
    }

    /// Returns the rank of a component type within this signature.
    ///
    /// Containers lay their columns out in rank order.
    #[must_use]
    pub fn position(&self, component: ComponentType) -> Option<usize> {
        self.types.binary_search(&component).ok()
    }

    /// Checks if this signature contains every type in `others`.
    #[must_use]
    pub fn contains_all(&self, others: &[ComponentType]) -> bool {
        others.iter().all(|c| self.contains(*c))
    }

    /// Checks if this signature contains at least one type in `others`.
    #[must_use]
    pub fn contains_any(&self, others: &[ComponentType]) -> bool {
        others.iter().any(|c| self.contains(*c))
    }

    /// Returns a new signature with the component added.
    #[must_use]
    pub fn with(&self, component: ComponentType) -> Self {
        match self.types.binary_search(&component) {
            Ok(_) => self.clone(),
            Err(pos) => {
                let mut types = self.types.clone();
                types.insert(pos, component);
                Self { types }
            }
        }
    }

    /// Returns a new signature with the component removed.
    #[must_use]
    pub fn without(&self, component: ComponentType) -> Self {
        let mut types = self.types.clone();
        if let Ok(pos) = types.binary_search(&component) {
            types.remove(pos);
        }
        Self { types }
    }

    /// Returns the union of two signatures.
    #[must_use]
    pub fn union(&self, other: &Signature) -> Self {
        let mut types = Vec::with_capacity(self.len() + other.len());
        types.extend_from_slice(&self.types);
        types.extend_from_slice(&other.types);
        Self::from_types(types)
    }

    /// Returns this signature minus every type in `removed`.
    #[must_use]
    pub fn difference(&self, removed: &[ComponentType]) -> Self {
        Self {
            types: self
                .types
                .iter()
                .copied()
                .filter(|c| !removed.contains(c))
                .collect(),
        }
    }
}

impl FromIterator<ComponentType> for Signature {
    fn from_iter<I: IntoIterator<Item = ComponentType>>(iter: I) -> Self {
        Self::from_types(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Signature {
    type Item = ComponentType;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ComponentType>>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter().copied()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Signature(")?;
        for (i, component) in self.types.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{component}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
