//! Core types for Bento.
//!
//! This crate provides:
//! - [`Entity`] - Random 128-bit entity identifiers
//! - [`Component`] / [`ComponentType`] - The capability trait for record fields
//!   and the registration-time tag that identifies each component type
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod component;
pub mod entity;
pub mod error;

pub use component::{
    Component, ComponentInfo, ComponentType, register_component, registered_components,
};
pub use entity::Entity;
pub use error::{Error, ErrorContext, ErrorKind, Result};
