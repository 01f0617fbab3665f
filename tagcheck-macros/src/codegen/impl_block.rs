//! Impl block generation for the `Structured` and `Checkable` traits.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericParam, Generics, Path};

use crate::ir::{FieldIR, RecordIR};

/// Generates the impl blocks emitted by the derive macro.
#[derive(Debug, Default)]
pub struct ImplBlockGenerator;

impl ImplBlockGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate `impl Structured` and `impl Checkable` for a record.
    pub fn generate(&self, record: &RecordIR) -> TokenStream {
        let ident = &record.ident;
        let krate = &record.krate;
        let type_name = record.type_name();
        let generics = self.bound_generics(&record.generics, krate);
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
        let fields = record.fields.iter().map(|field| self.generate_field(field, krate));

        quote! {
            #[automatically_derived]
            impl #impl_generics #krate::Structured for #ident #ty_generics #where_clause {
                fn fields(&self) -> ::std::vec::Vec<#krate::Field<'_>> {
                    ::std::vec![#(#fields),*]
                }

                fn type_name(&self) -> &'static str {
                    #type_name
                }
            }

            #[automatically_derived]
            impl #impl_generics #krate::Checkable for #ident #ty_generics #where_clause {
                fn value(&self) -> #krate::Value<'_> {
                    #krate::Value::Struct(self)
                }
            }
        }
    }

    /// Generate the `Field` descriptor expression for one field.
    fn generate_field(&self, field: &FieldIR, krate: &Path) -> TokenStream {
        let member = &field.member;
        let name = &field.name;
        let public = field.public;

        let tags = if field.tags.is_empty() {
            quote! {}
        } else {
            let pairs = field.tags.iter().map(|tag| {
                let (tag_name, text) = (&tag.name, &tag.text);
                quote! { (#tag_name, #text) }
            });
            quote! { .with_tags(&[#(#pairs),*]) }
        };

        quote! {
            #krate::Field::new(#name, &self.#member)
                .with_public(#public)
                #tags
        }
    }

    /// Require `Checkable` on every type parameter.
    fn bound_generics(&self, generics: &Generics, krate: &Path) -> Generics {
        let mut generics = generics.clone();
        for param in &mut generics.params {
            if let GenericParam::Type(type_param) = param {
                type_param.bounds.push(syn::parse_quote!(#krate::Checkable));
            }
        }
        generics
    }
}
