//! Failure conditions and their override behaviours.
//!
//! | Type                  | Purpose                                        |
//! |-----------------------|------------------------------------------------|
//! | [`Condition`]         | Where evaluation of a raw value went wrong     |
//! | [`Behavior`]          | Fallback value plus optional side-effect task  |
//! | [`ConditionRegistry`] | Condition → Behavior mapping, last write wins  |

mod registry;

pub use registry::{Behavior, ConditionRegistry, Setting, Task};

use std::fmt;

/// A classified failure point in value evaluation.
///
/// The set is closed; evaluation checks them in declaration order and
/// stops at the first one hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Condition {
    /// Raw value absent or empty.
    Empty,
    /// The extraction function returned an error.
    ParseFailed,
    /// A constraint rejected the value, or failed while checking it.
    Invalid,
}

impl Condition {
    /// Every condition, in evaluation order.
    pub const ALL: [Condition; 3] = [Self::Empty, Self::ParseFailed, Self::Invalid];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::ParseFailed => "parse failed",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_in_evaluation_order() {
        let mut sorted = Condition::ALL;
        sorted.sort();
        assert_eq!(sorted, Condition::ALL);
        assert_eq!(Condition::ParseFailed.to_string(), "parse failed");
    }
}
