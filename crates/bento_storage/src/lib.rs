//! Archetype storage for Bento.
//!
//! This crate provides:
//! - [`Storage`] - Entities grouped into containers by exact signature
//! - [`Container`] - Dense per-signature columns with O(1) swap-remove
//! - [`ComponentSet`] / [`Bundle`] - Owned component maps and their builders
//! - [`Filter`] / [`View`] - Boolean predicates over signatures, evaluated
//!   against the inverted index
//! - [`Query`] / [`Select`] - Typed lazy iteration over matching containers
//! - [`CommandBuffer`] - Deferred structural changes applied in one flush

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bundle;
mod column;
pub mod command;
pub mod config;
pub mod container;
pub mod filter;
pub mod query;
pub mod signature;
pub mod storage;
pub mod view;

pub use bundle::{Bundle, ComponentSet};
pub use command::{Command, CommandBuffer};
pub use config::StorageConfig;
pub use container::Container;
pub use filter::Filter;
pub use query::{Query, Select};
pub use signature::Signature;
pub use storage::{ContainerHandle, ContainerIndex, Storage};
pub use view::View;
