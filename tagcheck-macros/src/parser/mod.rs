//! Parser module for extracting record information from the Rust AST.
//!
//! This module contains parsers for:
//! - Struct definitions
//! - `#[structured(...)]` and `#[tag(...)]` attributes

pub mod attributes;
pub mod struct_parser;
