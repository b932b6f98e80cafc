//! Field value forms and the zero-value table.

use crate::extract::PropertyValue;

/// A type a bound field may have.
///
/// Evaluation of a bound field always yields `Option<Self::Value>`; the field
/// type decides what an absent result becomes. `None` from
/// [`FieldValue::from_evaluated`] leaves the field untouched.
pub trait FieldValue: Sized + 'static {
    type Value: PropertyValue;

    fn from_evaluated(value: Option<Self::Value>) -> Option<Self>;
}

/// Non-nullable numeric, boolean and character kinds.
pub trait Primitive: PropertyValue + Copy {
    /// Written into the field when evaluation yields no value.
    const ZERO: Self;
}

macro_rules! primitives {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const ZERO: Self = $zero;
            }

            impl FieldValue for $ty {
                type Value = $ty;

                #[inline]
                fn from_evaluated(value: Option<$ty>) -> Option<Self> {
                    Some(value.unwrap_or(Self::ZERO))
                }
            }
        )*
    };
}

primitives! {
    i8 => 0,
    i16 => 0,
    i32 => 0,
    i64 => 0,
    i128 => 0,
    isize => 0,
    u8 => 0,
    u16 => 0,
    u32 => 0,
    u64 => 0,
    u128 => 0,
    usize => 0,
    f32 => 0.0,
    f64 => 0.0,
    bool => false,
    char => '\0',
}

impl FieldValue for String {
    type Value = String;

    fn from_evaluated(value: Option<String>) -> Option<Self> {
        value
    }
}

/// Nullable form: an absent result is written as `None`.
impl<V: PropertyValue> FieldValue for Option<V> {
    type Value = V;

    fn from_evaluated(value: Option<V>) -> Option<Self> {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_absent_becomes_zero() {
        assert_eq!(<i32 as FieldValue>::from_evaluated(None), Some(0));
        assert_eq!(<f64 as FieldValue>::from_evaluated(None), Some(0.0));
        assert_eq!(<bool as FieldValue>::from_evaluated(None), Some(false));
        assert_eq!(<char as FieldValue>::from_evaluated(None), Some('\0'));
        assert_eq!(<u8 as FieldValue>::from_evaluated(Some(9)), Some(9));
    }

    #[test]
    fn test_nullable_and_text_forms() {
        assert_eq!(<Option<i32> as FieldValue>::from_evaluated(None), Some(None));
        assert_eq!(<Option<i32> as FieldValue>::from_evaluated(Some(4)), Some(Some(4)));
        assert_eq!(<String as FieldValue>::from_evaluated(None), None);
    }
}
