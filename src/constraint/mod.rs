//! Type-tagged value constraints.
//!
//! A [`Constraint`] declares which value types it applies to through a
//! [`TypeTag`]. The tag is checked against the bound field's value type when
//! the binding is resolved, so an incompatible constraint never reaches
//! evaluation.

mod builtin;

pub use builtin::{
    NumberMustBeNegative, NumberMustBePositive, NumberMustNotBeNegative, NumberMustNotBePositive,
    TextMustNotBeBlank,
};

use crate::error::{BindingError, BoxError};
use crate::extract::{PropertyValue, ValueKind};
use crate::property::Predicate;
use std::any::{Any, TypeId};
use std::fmt;

// ============================================================================
// TypeTag
// ============================================================================

/// The set of value types a constraint accepts.
///
/// `Option<T>` fields are checked through `T`, so a plain field and its
/// nullable form accept the same constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Any,
    /// Every integer and floating point kind.
    Number,
    Integer,
    Float,
    Boolean,
    Character,
    Text,
    /// Exactly one type.
    Exact { id: TypeId, name: &'static str },
}

impl TypeTag {
    pub fn of<T: 'static>() -> Self {
        Self::Exact {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Whether a value of type `V` may be handed to a constraint tagged `self`.
    pub fn is_assignable_from<V: PropertyValue>(&self) -> bool {
        match self {
            Self::Any => true,
            Self::Number => V::KIND.is_number(),
            Self::Integer => V::KIND.is_integer(),
            Self::Float => V::KIND.is_float(),
            Self::Boolean => V::KIND == ValueKind::Bool,
            Self::Character => V::KIND == ValueKind::Char,
            Self::Text => V::KIND == ValueKind::Text,
            Self::Exact { id, .. } => *id == TypeId::of::<V>(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any value"),
            Self::Number => f.write_str("numbers"),
            Self::Integer => f.write_str("integers"),
            Self::Float => f.write_str("floating point numbers"),
            Self::Boolean => f.write_str("booleans"),
            Self::Character => f.write_str("characters"),
            Self::Text => f.write_str("text"),
            Self::Exact { name, .. } => write!(f, "`{name}`"),
        }
    }
}

// ============================================================================
// Constraint
// ============================================================================

/// A predicate named on a bound field.
///
/// Instantiated through `Default` once per bind call. `test` only ever sees
/// value types accepted by [`Constraint::applicable_type`].
pub trait Constraint: Default + Send + Sync + 'static {
    fn applicable_type(&self) -> TypeTag;

    /// `Ok(false)` and `Err` both reject the value.
    fn test<V: PropertyValue>(&self, value: &V) -> Result<bool, BoxError>;
}

/// Concrete view of a value checked by a [`TypeTag::Exact`] constraint.
pub fn downcast_value<T: 'static, V: PropertyValue>(value: &V) -> Option<&T> {
    (value as &dyn Any).downcast_ref::<T>()
}

/// Instantiate `C` and check it against the value type `V` of `field`.
pub fn resolve<C: Constraint, V: PropertyValue>(
    field: &'static str,
) -> Result<Predicate<V>, BindingError> {
    let constraint = C::default();
    let expected = constraint.applicable_type();
    if !expected.is_assignable_from::<V>() {
        return Err(BindingError::IncompatibleConstraint {
            constraint: std::any::type_name::<C>(),
            field,
            expected,
            found: V::type_name(),
        });
    }
    Ok(Predicate::fallible(move |value: &V| constraint.test(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct EvenOnly;

    impl Constraint for EvenOnly {
        fn applicable_type(&self) -> TypeTag {
            TypeTag::of::<u32>()
        }

        fn test<V: PropertyValue>(&self, value: &V) -> Result<bool, BoxError> {
            let value = downcast_value::<u32, V>(value).ok_or("expected a `u32`")?;
            Ok(value % 2 == 0)
        }
    }

    #[test]
    fn test_number_tag_accepts_every_numeric_kind() {
        assert!(TypeTag::Number.is_assignable_from::<u8>());
        assert!(TypeTag::Number.is_assignable_from::<i8>());
        assert!(TypeTag::Number.is_assignable_from::<f64>());
        assert!(!TypeTag::Number.is_assignable_from::<String>());
        assert!(!TypeTag::Number.is_assignable_from::<bool>());
    }

    #[test]
    fn test_narrow_tags() {
        assert!(TypeTag::Integer.is_assignable_from::<usize>());
        assert!(!TypeTag::Integer.is_assignable_from::<f32>());
        assert!(TypeTag::Float.is_assignable_from::<f32>());
        assert!(TypeTag::Boolean.is_assignable_from::<bool>());
        assert!(TypeTag::Character.is_assignable_from::<char>());
        assert!(TypeTag::Text.is_assignable_from::<String>());
        assert!(TypeTag::Any.is_assignable_from::<char>());
    }

    #[test]
    fn test_exact_tag() {
        let tag = TypeTag::of::<u32>();
        assert!(tag.is_assignable_from::<u32>());
        assert!(!tag.is_assignable_from::<u64>());
        assert_eq!(tag.to_string(), "`u32`");
    }

    #[test]
    fn test_resolve_compatible_constraint() {
        let predicate = resolve::<NumberMustBePositive, u8>("count").unwrap();
        assert!(predicate.test(&3).unwrap());
        assert!(!predicate.test(&0).unwrap());

        let even = resolve::<EvenOnly, u32>("count").unwrap();
        assert!(even.test(&4).unwrap());
        assert!(!even.test(&5).unwrap());
    }

    #[test]
    fn test_resolve_rejects_incompatible_field_type() {
        let err = resolve::<NumberMustBePositive, String>("name").unwrap_err();
        match err {
            BindingError::IncompatibleConstraint {
                constraint,
                field,
                expected,
                found,
            } => {
                assert!(constraint.ends_with("NumberMustBePositive"));
                assert_eq!(field, "name");
                assert_eq!(expected, TypeTag::Number);
                assert_eq!(found, "String");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(resolve::<EvenOnly, i32>("count").is_err());
    }
}
