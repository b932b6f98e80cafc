//! Built-in parsers for primitive kinds and `String`.

use super::{Extraction, PropertyValue, ValueKind};
use crate::property::ExtractFn;
use std::convert::Infallible;
use std::str::{FromStr, ParseBoolError};

// ============================================================================
// Parsers
// ============================================================================

/// Integer and character parsing, no surrounding whitespace allowed.
pub(crate) fn parse_exact<T: FromStr>(raw: &str) -> Result<T, T::Err> {
    raw.parse()
}

/// Floating point parsing, surrounding whitespace is ignored.
pub(crate) fn parse_float<T: FromStr>(raw: &str) -> Result<T, T::Err> {
    raw.trim().parse()
}

/// `true` / `false` in any ASCII case.
pub(crate) fn parse_bool(raw: &str) -> Result<bool, ParseBoolError> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        raw.parse()
    }
}

// ============================================================================
// PropertyValue impls
// ============================================================================

macro_rules! numeric {
    ($($ty:ty => $kind:ident ($parse:ident)),* $(,)?) => {
        $(
            impl PropertyValue for $ty {
                const KIND: ValueKind = ValueKind::$kind;

                fn extraction() -> Extraction<Self> {
                    Extraction::BuiltIn(ExtractFn::new($parse::<$ty>))
                }

                fn type_name() -> &'static str {
                    stringify!($ty)
                }

                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn as_f64(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

numeric! {
    i8 => I8 (parse_exact),
    i16 => I16 (parse_exact),
    i32 => I32 (parse_exact),
    i64 => I64 (parse_exact),
    i128 => I128 (parse_exact),
    isize => Isize (parse_exact),
    u8 => U8 (parse_exact),
    u16 => U16 (parse_exact),
    u32 => U32 (parse_exact),
    u64 => U64 (parse_exact),
    u128 => U128 (parse_exact),
    usize => Usize (parse_exact),
    f32 => F32 (parse_float),
    f64 => F64 (parse_float),
}

impl PropertyValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn extraction() -> Extraction<Self> {
        Extraction::BuiltIn(ExtractFn::new(parse_bool))
    }

    fn type_name() -> &'static str {
        "bool"
    }
}

impl PropertyValue for char {
    const KIND: ValueKind = ValueKind::Char;

    fn extraction() -> Extraction<Self> {
        Extraction::BuiltIn(ExtractFn::new(parse_exact::<char>))
    }

    fn type_name() -> &'static str {
        "char"
    }
}

impl PropertyValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn extraction() -> Extraction<Self> {
        Extraction::BuiltIn(ExtractFn::new(|raw: &str| Ok::<_, Infallible>(raw.to_owned())))
    }

    fn type_name() -> &'static str {
        "String"
    }

    fn as_str(&self) -> Option<&str> {
        Some(self.as_str())
    }
}
