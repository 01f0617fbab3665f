//! Attribute parsing using darling.
//!
//! `#[structured(...)]` carries derive options on the container and on
//! fields. `#[tag(name = "text", ...)]` carries the metadata tags that the
//! validator reads; it is forwarded untouched and parsed by [`parse_tags`].

use darling::{FromDeriveInput, FromField};
use syn::{Attribute, Generics, Ident, LitStr, Path, Visibility};

use crate::error::TagError;
use crate::ir::TagPair;

/// Container-level attributes, parsed from `#[structured(...)]` on the type.
#[derive(Debug, Clone, FromDeriveInput)]
#[darling(attributes(structured), supports(struct_any))]
pub struct ContainerAttrs {
    /// The identifier of the type
    pub ident: Ident,

    /// Generic parameters of the type
    pub generics: Generics,

    /// Path to the runtime crate (default: `::tagcheck`)
    #[darling(default, rename = "crate")]
    pub krate: Option<Path>,
}

impl ContainerAttrs {
    /// Path the generated code uses to reach the runtime crate.
    pub fn crate_path(&self) -> Path {
        self.krate
            .clone()
            .unwrap_or_else(|| syn::parse_quote!(::tagcheck))
    }
}

/// Field-level attributes, parsed from `#[structured(...)]` on a field.
#[derive(Debug, Clone, FromField)]
#[darling(attributes(structured), forward_attrs(tag))]
pub struct FieldAttrs {
    /// Field identifier (None for tuple struct fields)
    pub ident: Option<Ident>,

    /// Field visibility
    pub vis: Visibility,

    /// Forwarded `#[tag(...)]` attributes
    pub attrs: Vec<Attribute>,

    /// Name reported in error paths
    #[darling(default)]
    pub rename: Option<String>,

    /// Hide this field from the validator
    #[darling(default)]
    pub skip: bool,
}

impl FieldAttrs {
    /// Name used in error paths: the rename, the identifier, or the
    /// positional index for tuple fields.
    pub fn field_name(&self, index: usize) -> String {
        match (&self.rename, &self.ident) {
            (Some(rename), _) => rename.clone(),
            (None, Some(ident)) => ident.to_string(),
            (None, None) => index.to_string(),
        }
    }

    /// Only `pub` fields are public; restricted visibilities are not.
    pub fn is_public(&self) -> bool {
        matches!(self.vis, Visibility::Public(_))
    }
}

/// Collect `name = "text"` pairs from every `#[tag(...)]` attribute.
///
/// Pairs keep declaration order. Repeating a tag name is an error.
pub fn parse_tags(attrs: &[Attribute]) -> Result<Vec<TagPair>, TagError> {
    let mut tags: Vec<TagPair> = Vec::new();
    let mut duplicate: Option<TagError> = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("tag")) {
        attr.parse_nested_meta(|meta| {
            let name = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .ok_or_else(|| meta.error("expected a tag name such as `validate`"))?;
            let text: LitStr = meta.value()?.parse()?;

            if tags.iter().any(|tag| tag.name == name) {
                duplicate.get_or_insert_with(|| TagError::duplicate(name.as_str(), text.span()));
                return Ok(());
            }

            tags.push(TagPair::new(name, text.value()));
            Ok(())
        })?;
    }

    match duplicate {
        Some(error) => Err(error),
        None => Ok(tags),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn field(tokens: syn::Field) -> FieldAttrs {
        FieldAttrs::from_field(&tokens).unwrap()
    }

    #[test]
    fn test_parse_tags_in_order() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[tag(validate = "required,email")]),
            parse_quote!(#[tag(json = "email", db = "mail")]),
        ];
        let tags = parse_tags(&attrs).unwrap();
        let pairs: Vec<(&str, &str)> = tags
            .iter()
            .map(|t| (t.name.as_str(), t.text.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("validate", "required,email"),
                ("json", "email"),
                ("db", "mail")
            ]
        );
    }

    #[test]
    fn test_parse_tags_ignores_other_attributes() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[doc = "hi"]), parse_quote!(#[serde(skip)])];
        assert!(parse_tags(&attrs).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_tag_is_rejected() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[tag(validate = "required")]),
            parse_quote!(#[tag(validate = "email")]),
        ];
        let err = parse_tags(&attrs).unwrap_err();
        assert!(matches!(err, TagError::Duplicate { ref name, .. } if name == "validate"));
        assert!(err.hint().is_some());
    }

    #[test]
    fn test_non_string_tag_is_rejected() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[tag(validate = 3)])];
        let err = parse_tags(&attrs).unwrap_err();
        assert!(matches!(err, TagError::Malformed(_)));
        assert!(err.hint().is_none());
    }

    #[test]
    fn test_field_attrs() {
        let named = field(parse_quote! {
            #[structured(rename = "mail")]
            #[tag(validate = "email")]
            pub email: String
        });
        assert_eq!(named.field_name(0), "mail");
        assert!(named.is_public());
        assert_eq!(named.attrs.len(), 1);

        let private = field(parse_quote! { pub(crate) secret: String });
        assert_eq!(private.field_name(3), "secret");
        assert!(!private.is_public());

        let skipped = field(parse_quote! { #[structured(skip)] cache: u8 });
        assert!(skipped.skip);
    }

    #[test]
    fn test_crate_path() {
        let input: syn::DeriveInput = parse_quote! {
            #[structured(crate = "my_reexport::tagcheck")]
            struct Foo;
        };
        let attrs = ContainerAttrs::from_derive_input(&input).unwrap();
        let path = attrs.crate_path();
        assert_eq!(quote::quote!(#path).to_string(), "my_reexport :: tagcheck");

        let input: syn::DeriveInput = parse_quote!(struct Bar;);
        let attrs = ContainerAttrs::from_derive_input(&input).unwrap();
        let path = attrs.crate_path();
        assert_eq!(quote::quote!(#path).to_string(), ":: tagcheck");
    }
}
