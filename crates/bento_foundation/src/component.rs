//! Component type tags and the process-wide component registry.
//!
//! Every component type is assigned a small integer tag the first time it
//! is registered. Tags are dense, stable for the lifetime of the process,
//! and cheap to hash and compare, which makes them the key for every index
//! the storage maintains.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Registration-time tag identifying a component type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ComponentType(u32);

impl ComponentType {
    /// Returns the tag for `T`, registering it if needed.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        T::component_type()
    }

    /// Returns the raw index of this tag.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns the fully qualified Rust type name registered for this tag.
    #[must_use]
    pub fn type_name(self) -> Option<&'static str> {
        REGISTRY.read().infos.get(self.0 as usize).map(|info| info.type_name)
    }

    /// Returns the last path segment of the registered type name.
    #[must_use]
    pub fn short_name(self) -> &'static str {
        self.type_name().map_or("<unregistered>", short_type_name)
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentType({}:{})", self.0, self.short_name())
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Capability every record-field type must expose.
///
/// Implementing the trait is all that is needed; the tag is assigned lazily
/// on first use.
///
/// ```
/// use bento_foundation::{Component, ComponentType};
///
/// #[derive(Clone, Debug)]
/// struct Health(u32);
/// impl Component for Health {}
///
/// assert_eq!(Health::component_type(), ComponentType::of::<Health>());
/// ```
pub trait Component: Clone + Send + Sync + fmt::Debug + 'static {
    /// Returns this type's tag.
    fn component_type() -> ComponentType {
        register_component::<Self>()
    }
}

/// Metadata recorded for a registered component type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentInfo {
    /// The assigned tag.
    pub id: ComponentType,
    /// Fully qualified Rust type name.
    pub type_name: &'static str,
    type_id: TypeId,
}

impl ComponentInfo {
    /// Returns the Rust `TypeId` this tag was assigned to.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

#[derive(Default)]
struct Registry {
    by_type: HashMap<TypeId, ComponentType>,
    infos: Vec<ComponentInfo>,
}

impl Registry {
    fn intern(&mut self, type_id: TypeId, type_name: &'static str) -> ComponentType {
        if let Some(&id) = self.by_type.get(&type_id) {
            return id;
        }

        let index = u32::try_from(self.infos.len()).unwrap_or_else(|_| too_many_components());
        let id = ComponentType(index);
        self.infos.push(ComponentInfo {
            id,
            type_name,
            type_id,
        });
        self.by_type.insert(type_id, id);
        id
    }
}

static REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::default()));

/// Registers `T` and returns its tag.
///
/// Idempotent: every call for the same type returns the same tag.
pub fn register_component<T: Component>() -> ComponentType {
    let type_id = TypeId::of::<T>();
    if let Some(&id) = REGISTRY.read().by_type.get(&type_id) {
        return id;
    }
    REGISTRY
        .write()
        .intern(type_id, std::any::type_name::<T>())
}

/// Returns metadata for every component type registered so far, in tag order.
#[must_use]
pub fn registered_components() -> Vec<ComponentInfo> {
    REGISTRY.read().infos.clone()
}

fn short_type_name(name: &'static str) -> &'static str {
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base)
}

#[cold]
fn too_many_components() -> ! {
    panic!("component registry exhausted the u32 tag space")
}
