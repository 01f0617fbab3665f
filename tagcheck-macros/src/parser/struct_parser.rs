//! Struct parsing logic.
//!
//! Lowers named, tuple and unit structs into [`RecordIR`].

use darling::{FromDeriveInput, FromField};
use syn::{Data, DeriveInput, Fields, Index, Member};

use crate::error::TagError;
use crate::ir::{FieldIR, RecordIR};
use crate::parser::attributes::{parse_tags, ContainerAttrs, FieldAttrs};

/// Error type for struct parsing failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StructParseError {
    #[error("Failed to parse container attributes: {0}")]
    ContainerAttrs(String),

    #[error("Failed to parse field attributes: {0}")]
    FieldAttrs(String),

    #[error("Invalid tag: {0}")]
    Tag(TagError),

    #[error("Structured can only be derived for structs, found {0}")]
    NotAStruct(String),
}

/// Parses Rust struct definitions into RecordIR.
pub struct StructParser;

impl StructParser {
    pub fn parse(input: &DeriveInput) -> Result<RecordIR, StructParseError> {
        let data_struct = match &input.data {
            Data::Struct(s) => s,
            Data::Enum(_) => return Err(StructParseError::NotAStruct("enum".to_string())),
            Data::Union(_) => return Err(StructParseError::NotAStruct("union".to_string())),
        };

        let container_attrs = ContainerAttrs::from_derive_input(input)
            .map_err(|e| StructParseError::ContainerAttrs(e.to_string()))?;

        let fields = match &data_struct.fields {
            Fields::Named(fields) => Self::parse_fields(fields.named.iter())?,
            Fields::Unnamed(fields) => Self::parse_fields(fields.unnamed.iter())?,
            Fields::Unit => Vec::new(),
        };

        Ok(
            RecordIR::new(container_attrs.ident.clone(), container_attrs.crate_path())
                .with_generics(container_attrs.generics.clone())
                .with_fields(fields),
        )
    }

    fn parse_fields<'f>(
        fields: impl Iterator<Item = &'f syn::Field>,
    ) -> Result<Vec<FieldIR>, StructParseError> {
        let mut field_irs = Vec::new();

        for (index, field) in fields.enumerate() {
            let attrs = FieldAttrs::from_field(field)
                .map_err(|e| StructParseError::FieldAttrs(e.to_string()))?;

            if attrs.skip {
                continue;
            }

            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(Index::from(index)),
            };
            let tags = parse_tags(&attrs.attrs).map_err(StructParseError::Tag)?;

            field_irs.push(
                FieldIR::new(member, attrs.field_name(index))
                    .with_public(attrs.is_public())
                    .with_tags(tags),
            );
        }

        Ok(field_irs)
    }
}
