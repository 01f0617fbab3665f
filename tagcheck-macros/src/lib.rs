//! # tagcheck-macros
//!
//! Procedural macros for describing records to the tagcheck validator.
//!
//! This crate provides the `#[derive(Structured)]` macro. It implements
//! `tagcheck::Structured` (field enumeration with names, visibility and
//! metadata tags) and `tagcheck::Checkable` (so the record can be nested
//! inside other records) for structs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tagcheck::Structured;
//!
//! #[derive(Structured)]
//! struct User {
//!     #[tag(validate = "required,email")]
//!     pub email: String,
//!
//!     #[tag(validate = "min:18", json = "age")]
//!     pub age: u32,
//!
//!     #[structured(skip)]
//!     cache: Vec<u8>,
//! }
//! ```
//!
//! ## Attributes
//!
//! ### Container Attributes
//!
//! - `#[structured(crate = "path::to::tagcheck")]` - Path used to reach the runtime crate
//!
//! ### Field Attributes
//!
//! - `#[tag(name = "text", ...)]` - Metadata tags read by the validator
//! - `#[structured(rename = "name")]` - Name reported in error paths
//! - `#[structured(skip)]` - Hide the field from the validator
//!
//! Only fields declared `pub` are public. `pub(crate)` and friends count as
//! private.

use proc_macro::TokenStream;
use syn::DeriveInput;

mod codegen;
mod error;
mod ir;
mod parser;

use codegen::ImplBlockGenerator;
use parser::struct_parser::{StructParseError, StructParser};

/// Derive macro for `Structured` and `Checkable`.
///
/// # Example
///
/// ```rust,ignore
/// use tagcheck::Structured;
///
/// #[derive(Structured)]
/// struct Point(#[tag(validate = "min:0")] pub i32, #[tag(validate = "min:0")] pub i32);
/// ```
#[proc_macro_derive(Structured, attributes(tag, structured))]
pub fn derive_structured(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    match derive_structured_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn derive_structured_impl(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    let record = StructParser::parse(input).map_err(|e| convert_parse_error(e, input))?;

    let generator = ImplBlockGenerator::new();
    Ok(generator.generate(&record))
}

/// Convert a StructParseError to a syn::Error with proper span information.
fn convert_parse_error(error: StructParseError, input: &DeriveInput) -> syn::Error {
    match error {
        StructParseError::Tag(tag_error) => tag_error.into_syn_error(),
        StructParseError::ContainerAttrs(msg) => syn::Error::new_spanned(
            &input.ident,
            format!("Invalid container attributes: {}", msg),
        ),
        StructParseError::FieldAttrs(msg) => {
            syn::Error::new_spanned(&input.ident, format!("Invalid field attributes: {}", msg))
        }
        StructParseError::NotAStruct(kind) => syn::Error::new_spanned(
            &input.ident,
            format!("Structured can only be derived for structs, found {}", kind),
        ),
    }
}
