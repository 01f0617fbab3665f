//! Record introspection.
//!
//! A [`Structured`] type exposes its fields in declaration order, each with
//! a name, a visibility flag, its metadata tags and a [`Checkable`] view of
//! its value. `#[derive(Structured)]` generates the implementation.

use std::fmt;

use crate::value::Checkable;

/// A record whose fields can be walked by a validator.
pub trait Structured {
    /// The record's fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;

    /// Name of the record type, used for diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// One field of a [`Structured`] record.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    name: &'a str,
    value: &'a dyn Checkable,
    public: bool,
    tags: &'a [(&'a str, &'a str)],
}

impl<'a> Field<'a> {
    /// A public field with no tags.
    pub fn new(name: &'a str, value: &'a dyn Checkable) -> Self {
        Self {
            name,
            value,
            public: true,
            tags: &[],
        }
    }

    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Attach metadata tags as `(tag name, tag text)` pairs.
    pub fn with_tags(mut self, tags: &'a [(&'a str, &'a str)]) -> Self {
        self.tags = tags;
        self
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn value(&self) -> &'a dyn Checkable {
        self.value
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn tags(&self) -> &'a [(&'a str, &'a str)] {
        self.tags
    }

    /// Text of the tag called `tag_name`, if the field carries one.
    pub fn tag(&self, tag_name: &str) -> Option<&'a str> {
        self.tags
            .iter()
            .find(|(name, _)| *name == tag_name)
            .map(|(_, text)| *text)
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("value", &self.value.value())
            .field("public", &self.public)
            .field("tags", &self.tags)
            .finish()
    }
}
