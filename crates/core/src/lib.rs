//! Shared domain types for the DearAI backend.
//!
//! - [`error`] -- the domain error type every crate maps into.
//! - [`types`] -- ID and timestamp aliases used across crates.

pub mod error;
pub mod types;
