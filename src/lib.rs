//! Bento - Archetype-based in-memory entity storage
//!
//! This crate re-exports all layers of the Bento system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: bento_runtime    - Systems, schedules, demo driver
//! Layer 1: bento_storage    - Containers, storage, filters, views, command buffers
//! Layer 0: bento_foundation - Core types (Entity, ComponentType, Error)
//! ```
//!
//! # Example
//!
//! ```
//! use bento::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Position(i32, i32);
//! impl Component for Position {}
//!
//! let mut storage = Storage::new();
//! let e = storage.create((Position(1, 2),));
//! assert_eq!(storage.get::<Position>(e).unwrap(), &Position(1, 2));
//! ```

pub use bento_foundation as foundation;
pub use bento_runtime as runtime;
pub use bento_storage as storage;

/// The types most programs need.
pub mod prelude {
    pub use bento_foundation::{Component, ComponentType, Entity, Error, ErrorKind, Result};
    pub use bento_runtime::{Schedule, System, TickContext};
    pub use bento_storage::{
        Bundle, CommandBuffer, ComponentSet, Filter, Query, Signature, Storage, View,
    };
}
