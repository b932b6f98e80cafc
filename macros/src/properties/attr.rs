//! Attribute parsing for the Properties derive macro.

use syn::{Attribute, LitStr, Meta, Path};

/// Get section prefix from #[property(section = "xxx")].
pub fn get_section(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut section = None;
    for attr in property_attrs(attrs) {
        if matches!(attr.meta, Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("section") {
                let lit: LitStr = meta.value()?.parse()?;
                section = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("expected `section = \"...\"` on a struct"))
            }
        })?;
    }
    Ok(section)
}

/// Parsed field-level #[property(...)].
#[derive(Default)]
pub struct FieldAttrs {
    pub key: Option<String>,
    pub extractor: Option<Path>,
    pub constraints: Vec<Path>,
}

/// Parse field attributes, `None` when the field carries no #[property].
pub fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<Option<FieldAttrs>> {
    let mut found = None;
    for attr in property_attrs(attrs) {
        let parsed = found.get_or_insert_with(FieldAttrs::default);
        // Bare `#[property]`
        if matches!(attr.meta, Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("key") {
                let lit: LitStr = meta.value()?.parse()?;
                parsed.key = Some(lit.value());
            } else if meta.path.is_ident("extractor") {
                parsed.extractor = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("constraints") {
                meta.parse_nested_meta(|inner| {
                    parsed.constraints.push(inner.path);
                    Ok(())
                })?;
            } else {
                return Err(meta.error("expected `key`, `extractor` or `constraints`"));
            }
            Ok(())
        })?;
    }
    Ok(found)
}

fn property_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("property"))
}
