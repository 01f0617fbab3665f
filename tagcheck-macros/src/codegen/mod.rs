//! Rust code generation module.
//!
//! This module generates the `Structured` and `Checkable` impl blocks.

pub mod impl_block;

pub use impl_block::ImplBlockGenerator;
