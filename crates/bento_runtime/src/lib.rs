//! Lifecycle dispatch and the demo driver for Bento.
//!
//! This crate provides:
//! - [`System`] - Start/update/stop hooks run against a [`Storage`]
//! - [`Schedule`] - An ordered list of systems dispatched as one
//! - [`TickContext`] - The per-tick context handed to every hook
//! - [`demo`] - A small moving-points simulation driven by a [`Schedule`]
//!
//! [`Storage`]: bento_storage::Storage

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod context;
pub mod demo;
pub mod system;

pub use context::TickContext;
pub use demo::{DemoConfig, run_demo};
pub use system::{Hook, Schedule, System};
