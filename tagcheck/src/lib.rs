//! # tagcheck
//!
//! Declarative field validation driven by per-field metadata tags.
//!
//! Annotate struct fields with a check list such as `"required,min:3,email"`
//! and hand the struct to a [`Validator`]. The validator walks the record
//! (descending into nested records and through `Option`, `Box`, `Rc` and
//! `Arc` layers), runs each named check in order and stops at the first
//! failure, reporting it with the dotted path of the failing field.
//!
//! ## Quick Start
//!
//! ```rust
//! use tagcheck::Structured;
//!
//! #[derive(Structured)]
//! pub struct Address {
//!     #[tag(validate = "required")]
//!     pub city: String,
//! }
//!
//! #[derive(Structured)]
//! pub struct User {
//!     #[tag(validate = "required,email")]
//!     pub email: String,
//!     #[tag(validate = "min:18")]
//!     pub age: u32,
//!     pub address: Option<Address>,
//! }
//!
//! let user = User {
//!     email: "jane@example.com".into(),
//!     age: 30,
//!     address: Some(Address { city: String::new() }),
//! };
//! let err = tagcheck::validate(&user, &[]).unwrap_err();
//! assert_eq!(err.to_string(), "address.city: required check failed: value missing");
//! ```
//!
//! ## Features
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `derive` | `#[derive(Structured)]` | ✅ |
//!
//! ## Check Lists
//!
//! A check list is split on `,` into segments. Each segment is either the
//! name of a registered checker (`email`) or a checker maker invocation
//! (`min:3`, `one_of:red|green`). Whitespace around segments and empty
//! segments are ignored. Both separators and the tag name are configurable
//! through [`ValidatorConfig`].
//!
//! Zero values (empty strings, `0`, `false`, `None`, empty collections) skip
//! every check except `required`, `eq`, `ne`, `min` and `max`.
//!
//! ## Field Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `#[tag(validate = "...")]` | Attach a tag; any tag name may be used |
//! | `#[structured(rename = "name")]` | Name used in error paths |
//! | `#[structured(skip)]` | Hide the field from the validator |
//!
//! Only `pub` fields are public. A non-public field carrying a check list
//! is an error unless [`ValidatorConfig::error_on_private`] is turned off.
//!
//! ## Custom Checks
//!
//! ```rust
//! use tagcheck::{CheckError, Validator, Value};
//!
//! let validator = Validator::new();
//! validator.register_checker("even", |value: &Value<'_>| match value {
//!     Value::Int(n) if n % 2 == 0 => Ok(()),
//!     _ => Err(CheckError::invalid("must be even")),
//! });
//! assert!(validator.check_value(&4, "even").is_ok());
//! assert!(validator.check_value(&3, "even").is_err());
//! ```
//!
//! ## Manual Implementation
//!
//! ```rust
//! use tagcheck::{Checkable, Field, Structured, Validator, Value};
//!
//! struct Pair {
//!     left: i32,
//!     right: i32,
//! }
//!
//! impl Structured for Pair {
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("left", &self.left).with_tags(&[("validate", "min:0")]),
//!             Field::new("right", &self.right).with_tags(&[("validate", "max:10")]),
//!         ]
//!     }
//! }
//!
//! impl Checkable for Pair {
//!     fn value(&self) -> Value<'_> {
//!         Value::Struct(self)
//!     }
//! }
//!
//! let err = Validator::new().validate(&Pair { left: 1, right: 11 }, &[]).unwrap_err();
//! assert_eq!(err.path(), "right");
//! ```

extern crate self as tagcheck;

pub mod checks;
pub mod checksum;
pub mod config;
pub mod error;
pub mod parser;
pub mod registry;
pub mod structured;
pub mod validator;
pub mod value;

pub use checks::{one_of, regex_checker};
pub use config::ValidatorConfig;
pub use error::{
    CheckError, ConfigError, ErrorKind, ErrorReport, Failure, ValidationError, ValidationResult,
};
pub use parser::{parse_check_list, BoundCheck};
pub use registry::{Checker, CheckerMaker, CheckerRegistry};
pub use structured::{Field, Structured};
pub use validator::Validator;
pub use value::{Checkable, Kind, Value, MAX_DEREF_DEPTH};

// Re-export derive macro when available
#[cfg(feature = "derive")]
pub use tagcheck_macros::Structured;

/// Validate `value` with the global [`Validator`].
pub fn validate<T: Checkable + ?Sized>(value: &T, checks: &[&str]) -> ValidationResult<()> {
    Validator::global().validate(value, checks)
}

/// Register a checker on the global [`Validator`].
pub fn register_checker<F>(name: impl Into<String>, checker: F)
where
    F: Fn(&Value<'_>) -> Result<(), CheckError> + Send + Sync + 'static,
{
    Validator::global().register_checker(name, checker);
}

/// Register a checker maker on the global [`Validator`].
pub fn register_checker_maker<F>(name: impl Into<String>, maker: F)
where
    F: Fn(&str) -> Result<Checker, CheckError> + Send + Sync + 'static,
{
    Validator::global().register_checker_maker(name, maker);
}
