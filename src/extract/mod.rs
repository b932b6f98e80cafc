//! String-to-value extraction strategies.
//!
//! | Item                         | Purpose                                         |
//! |------------------------------|-------------------------------------------------|
//! | [`PropertyValue`]            | A type a property can be extracted into         |
//! | [`Extraction`]               | How a value type is built from a string         |
//! | [`Extractor`]                | Strategy named on a bound field                 |
//! | [`GenericExtractor`]         | Built-in parser, else the type's string constructor |
//! | [`TolerantGenericExtractor`] | Generic extraction, every failure becomes absent |
//!
//! Custom types opt in with [`property_value!`](crate::property_value):
//!
//! ```
//! use propkit::property_value;
//! use std::str::FromStr;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Hostname(String);
//!
//! impl FromStr for Hostname {
//!     type Err = std::io::Error;
//!     fn from_str(s: &str) -> Result<Self, Self::Err> {
//!         Ok(Self(s.to_ascii_lowercase()))
//!     }
//! }
//!
//! property_value!(Hostname);
//! ```

mod builtin;

pub(crate) use builtin::{parse_bool, parse_exact, parse_float};

use crate::condition::ConditionRegistry;
use crate::error::{BindingError, BoxError, ConstructionError};
use crate::property::ExtractFn;

// ============================================================================
// Value kinds
// ============================================================================

/// Coarse classification of a value type, used for constraint applicability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Bool,
    Char,
    Text,
    Other,
}

impl ValueKind {
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::I128
                | Self::Isize
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::U128
                | Self::Usize
        )
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    pub const fn is_number(&self) -> bool {
        self.is_integer() || self.is_float()
    }
}

// ============================================================================
// PropertyValue
// ============================================================================

/// How a value type is built from a raw string.
pub enum Extraction<T> {
    /// One of the crate's primitive parsers.
    BuiltIn(ExtractFn<T>),
    /// A single-string constructor, usually `FromStr`.
    Constructor(fn(&str) -> Result<T, BoxError>),
    /// No string constructor; only a custom [`Extractor`] can produce it.
    Unsupported,
}

/// A type a property can be extracted into.
pub trait PropertyValue: Clone + Send + Sync + 'static {
    const KIND: ValueKind;

    fn extraction() -> Extraction<Self>;

    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Numeric view, `None` for non-numbers.
    fn as_f64(&self) -> Option<f64> {
        None
    }

    /// Text view, `None` for non-text.
    fn as_str(&self) -> Option<&str> {
        None
    }
}

/// Implement [`PropertyValue`] and [`FieldValue`](crate::FieldValue) for
/// custom types.
///
/// - `property_value!(Type)` extracts through `FromStr`
/// - `property_value!(Type, no_constructor)` has no string constructor and
///   needs a custom extractor
#[macro_export]
macro_rules! property_value {
    (@field $ty:ty) => {
        impl $crate::FieldValue for $ty {
            type Value = $ty;

            fn from_evaluated(value: ::std::option::Option<$ty>) -> ::std::option::Option<Self> {
                value
            }
        }
    };
    ($ty:ty) => {
        impl $crate::PropertyValue for $ty {
            const KIND: $crate::ValueKind = $crate::ValueKind::Other;

            fn extraction() -> $crate::Extraction<Self> {
                $crate::Extraction::Constructor(|raw| {
                    <$ty as ::std::str::FromStr>::from_str(raw).map_err(::std::convert::Into::into)
                })
            }
        }
        $crate::property_value!(@field $ty);
    };
    ($ty:ty, no_constructor) => {
        impl $crate::PropertyValue for $ty {
            const KIND: $crate::ValueKind = $crate::ValueKind::Other;

            fn extraction() -> $crate::Extraction<Self> {
                $crate::Extraction::Unsupported
            }
        }
        $crate::property_value!(@field $ty);
    };
}

// ============================================================================
// Extractors
// ============================================================================

/// Extraction strategy named on a bound field.
///
/// Instantiated through `Default` once per bind call.
pub trait Extractor<T: PropertyValue>: Default + 'static {
    fn extraction_method(&self) -> Result<ExtractFn<T>, BindingError>;

    /// Registry attached to every property this extractor produces.
    fn default_settings(&self) -> Option<ConditionRegistry<Option<T>>> {
        None
    }
}

/// Resolves the extraction function from the field's own type.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericExtractor;

impl<T: PropertyValue> Extractor<T> for GenericExtractor {
    fn extraction_method(&self) -> Result<ExtractFn<T>, BindingError> {
        resolve::<T>()
    }
}

/// [`GenericExtractor`] that turns every failure into an absent value.
///
/// Primitive fields then receive their zero value, `Option` fields `None`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TolerantGenericExtractor;

impl<T: PropertyValue> Extractor<T> for TolerantGenericExtractor {
    fn extraction_method(&self) -> Result<ExtractFn<T>, BindingError> {
        resolve::<T>()
    }

    fn default_settings(&self) -> Option<ConditionRegistry<Option<T>>> {
        Some(ConditionRegistry::always(None))
    }
}

/// Resolve the extraction function for `T`.
///
/// Fails now, not at evaluation, when `T` has no string constructor.
pub fn resolve<T: PropertyValue>() -> Result<ExtractFn<T>, BindingError> {
    match T::extraction() {
        Extraction::BuiltIn(parser) => Ok(parser),
        Extraction::Constructor(construct) => Ok(ExtractFn::new(move |raw: &str| {
            construct(raw).map_err(|source| ConstructionError {
                type_name: T::type_name(),
                value: raw.to_string(),
                source,
            })
        })),
        Extraction::Unsupported => Err(BindingError::NoStringConstructor {
            type_name: T::type_name(),
        }),
    }
}
