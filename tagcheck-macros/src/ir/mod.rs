//! Intermediate representation of a record.
//!
//! The parser lowers a `DeriveInput` into a [`RecordIR`], which the code
//! generator turns into `Structured` and `Checkable` impls.

use syn::{Generics, Ident, Member, Path};

/// A record type and its visible fields.
#[derive(Debug, Clone)]
pub struct RecordIR {
    /// Type identifier
    pub ident: Ident,
    /// Generic parameters, as declared
    pub generics: Generics,
    /// Path to the runtime crate
    pub krate: Path,
    /// Fields in declaration order, skipped fields excluded
    pub fields: Vec<FieldIR>,
}

impl RecordIR {
    pub fn new(ident: Ident, krate: Path) -> Self {
        Self {
            ident,
            generics: Generics::default(),
            krate,
            fields: Vec::new(),
        }
    }

    pub fn with_generics(mut self, generics: Generics) -> Self {
        self.generics = generics;
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldIR>) -> Self {
        self.fields = fields;
        self
    }

    pub fn type_name(&self) -> String {
        self.ident.to_string()
    }
}

/// One field of a record.
#[derive(Debug, Clone)]
pub struct FieldIR {
    /// How the field is accessed on `self`
    pub member: Member,
    /// Name reported in error paths
    pub name: String,
    /// Whether the field is declared `pub`
    pub public: bool,
    /// Metadata tags in declaration order
    pub tags: Vec<TagPair>,
}

impl FieldIR {
    pub fn new(member: Member, name: impl Into<String>) -> Self {
        Self {
            member,
            name: name.into(),
            public: true,
            tags: Vec::new(),
        }
    }

    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    pub fn with_tags(mut self, tags: Vec<TagPair>) -> Self {
        self.tags = tags;
        self
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.text.as_str())
    }
}

/// A `name = "text"` metadata tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPair {
    pub name: String,
    pub text: String,
}

impl TagPair {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}
