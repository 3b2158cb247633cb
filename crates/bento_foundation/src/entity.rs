//! Entity identifiers drawn from a 128-bit random space.

use std::fmt;

/// Opaque entity identifier.
///
/// Ids are minted from 128 random bits, so any number of storages, command
/// buffers, or threads can mint them without coordinating. An id carries no
/// data and is never reused; whether it is "alive" is purely a question of
/// whether some storage currently holds components for it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Entity(u128);

impl Entity {
    /// Mints a fresh entity id.
    ///
    /// Collisions are possible in principle but have probability on the
    /// order of `n² / 2¹²⁹` for `n` minted ids.
    #[must_use]
    pub fn generate() -> Self {
        Self(rand::random())
    }

    /// Wraps a raw 128-bit value as an entity id.
    #[must_use]
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Returns the raw 128-bit value.
    #[must_use]
    pub const fn to_raw(self) -> u128 {
        self.0
    }

    /// Returns the high 32 bits, used as a short human-readable tag.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn short(self) -> u32 {
        (self.0 >> 96) as u32
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({:032x})", self.0)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({:08x})", self.short())
    }
}
