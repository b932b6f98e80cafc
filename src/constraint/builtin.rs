use super::{Constraint, TypeTag};
use crate::error::BoxError;
use crate::extract::PropertyValue;

fn number<V: PropertyValue>(value: &V) -> Result<f64, BoxError> {
    value
        .as_f64()
        .ok_or_else(|| format!("`{}` is not a number", V::type_name()).into())
}

macro_rules! number_constraint {
    ($($(#[$doc:meta])* $name:ident => |$n:ident| $check:expr;)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Default, Clone, Copy)]
            pub struct $name;

            impl Constraint for $name {
                fn applicable_type(&self) -> TypeTag {
                    TypeTag::Number
                }

                fn test<V: PropertyValue>(&self, value: &V) -> Result<bool, BoxError> {
                    let $n = number(value)?;
                    Ok($check)
                }
            }
        )*
    };
}

number_constraint! {
    /// Rejects zero and negative numbers.
    NumberMustBePositive => |n| n > 0.0;
    /// Rejects zero and positive numbers.
    NumberMustBeNegative => |n| n < 0.0;
    /// Accepts zero and negative numbers.
    NumberMustNotBePositive => |n| n <= 0.0;
    /// Accepts zero and positive numbers.
    NumberMustNotBeNegative => |n| n >= 0.0;
}

/// Rejects text that is empty or whitespace only.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextMustNotBeBlank;

impl Constraint for TextMustNotBeBlank {
    fn applicable_type(&self) -> TypeTag {
        TypeTag::Text
    }

    fn test<V: PropertyValue>(&self, value: &V) -> Result<bool, BoxError> {
        let text = value
            .as_str()
            .ok_or_else(|| format!("`{}` is not text", V::type_name()))?;
        Ok(!text.trim().is_empty())
    }
}
