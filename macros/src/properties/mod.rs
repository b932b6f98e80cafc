//! Properties derive macro - generates the binding table.

mod attr;
mod field;
mod types;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use attr::get_section;
use field::FieldInfo;

/// Generate the Properties implementation.
pub fn derive(input: &DeriveInput) -> TokenStream {
    expand(input).unwrap_or_else(syn::Error::into_compile_error)
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Ok(quote! {
                    compile_error!("Properties only works on structs with named fields");
                });
            }
        },
        _ => return Ok(quote! { compile_error!("Properties only works on structs"); }),
    };

    let section = get_section(&input.attrs)?;

    // Fields without #[property] are left out of the table
    let mut bindings = Vec::new();
    for field in fields {
        if let Some(info) = FieldInfo::from_field(field, section.as_deref())? {
            bindings.push(info.binding());
        }
    }

    Ok(quote! {
        impl #impl_generics ::propkit::Properties for #name #ty_generics #where_clause {
            fn bindings() -> ::std::vec::Vec<::propkit::FieldBinding<Self>> {
                ::std::vec![#(#bindings),*]
            }
        }
    })
}
