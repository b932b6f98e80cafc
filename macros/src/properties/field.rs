//! Field information structures and parsing.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Ident, Path, Type};

use crate::properties::attr::parse_field_attrs;
use crate::properties::types::{FieldAccess, classify, qualify};

/// Parsed information for a field carrying #[property].
pub struct FieldInfo {
    pub ident: Ident,
    pub name: String,
    pub key: String,
    pub access: FieldAccess,
    pub extractor: Option<Path>,
    pub constraints: Vec<Path>,
    pub ty: Type,
}

impl FieldInfo {
    /// Parse field info, `None` for fields without #[property].
    pub fn from_field(field: &syn::Field, section: Option<&str>) -> syn::Result<Option<Self>> {
        let Some(ident) = field.ident.as_ref() else {
            return Ok(None);
        };
        let Some(attrs) = parse_field_attrs(&field.attrs)? else {
            return Ok(None);
        };

        let name = ident.unraw().to_string();
        let key = qualify(section, attrs.key.as_deref().unwrap_or(&name));

        Ok(Some(Self {
            ident: ident.clone(),
            name,
            key,
            access: classify(&field.ty),
            extractor: attrs.extractor,
            constraints: attrs.constraints,
            ty: field.ty.clone(),
        }))
    }

    /// Binding table entry for this field.
    pub fn binding(&self) -> TokenStream {
        let name = &self.name;
        match self.access {
            FieldAccess::Immutable => quote! {
                ::propkit::FieldBinding::<Self>::immutable(#name)
            },
            FieldAccess::Shared => quote! {
                ::propkit::FieldBinding::<Self>::shared(#name)
            },
            FieldAccess::Settable => {
                let ident = &self.ident;
                let ty = &self.ty;
                let key = &self.key;
                let extractor = self.extractor.as_ref().map(|path| {
                    quote! { .extractor::<#path>() }
                });
                let constraints = &self.constraints;
                quote! {
                    ::propkit::FieldBinding::<Self>::field::<#ty>(
                        #name,
                        |target: &mut Self| &mut target.#ident,
                    )
                    .key(#key)
                    #extractor
                    #(.constraint::<#constraints>())*
                    .build()
                }
            }
        }
    }
}
