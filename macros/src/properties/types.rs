//! Type helper functions for Properties derive macro.

use syn::Type;

/// How a field may be written after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccess {
    Settable,
    Immutable,
    Shared,
}

/// Classify a field by its declared type.
pub fn classify(ty: &Type) -> FieldAccess {
    match ty {
        Type::Reference(reference) => match &reference.lifetime {
            Some(lifetime) if lifetime.ident == "static" => FieldAccess::Shared,
            _ => FieldAccess::Immutable,
        },
        Type::Path(path) if path.qself.is_none() => match path.path.segments.last() {
            Some(segment) if segment.ident == "Rc" || segment.ident == "Arc" => {
                FieldAccess::Immutable
            }
            _ => FieldAccess::Settable,
        },
        Type::Group(group) => classify(&group.elem),
        Type::Paren(paren) => classify(&paren.elem),
        _ => FieldAccess::Settable,
    }
}

/// Join a section prefix onto a key.
pub fn qualify(section: Option<&str>, key: &str) -> String {
    match section {
        Some(section) if !section.is_empty() => format!("{section}.{key}"),
        _ => key.to_string(),
    }
}
