//! Cross-layer integration tests for Bento
//!
//! Tests that verify correct interaction between multiple crates.

mod lifecycle;
