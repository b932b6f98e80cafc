//! Error types.
//!
//! Two families:
//! - data errors ([`PropertyError::Missing`], [`PropertyError::InvalidType`],
//!   [`PropertyError::Validation`]), each tied to a [`Condition`] and
//!   interceptable through a [`ConditionRegistry`](crate::ConditionRegistry)
//! - [`BindingError`], structural misconfiguration that no registry can suppress

use crate::condition::Condition;
use crate::constraint::TypeTag;
use owo_colors::OwoColorize;
use std::error::Error as _;
use std::fmt;
use thiserror::Error;

/// Cause type for extraction and predicate failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// ============================================================================
// PropertyError
// ============================================================================

/// Errors raised while evaluating or binding a property.
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("property `{key}` is missing")]
    Missing { key: String },

    #[error("key `{key}` contains a value `{value}` that cannot be converted to the expected type")]
    InvalidType {
        key: String,
        value: String,
        #[source]
        source: BoxError,
    },

    #[error("key `{key}` contains an invalid value `{value}`")]
    Validation {
        key: String,
        value: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error(transparent)]
    Binding(#[from] BindingError),
}

impl PropertyError {
    /// The condition this error stands for, `None` for binding errors.
    pub const fn condition(&self) -> Option<Condition> {
        match self {
            Self::Missing { .. } => Some(Condition::Empty),
            Self::InvalidType { .. } => Some(Condition::ParseFailed),
            Self::Validation { .. } => Some(Condition::Invalid),
            Self::Binding(_) => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Missing { key } | Self::InvalidType { key, .. } | Self::Validation { key, .. } => {
                Some(key.as_str())
            }
            Self::Binding(_) => None,
        }
    }

    pub const fn is_binding(&self) -> bool {
        matches!(self, Self::Binding(_))
    }

    /// Colored multi-line report for terminal output.
    pub fn diagnostic(&self) -> Diagnostic<'_> {
        Diagnostic(self)
    }
}

// ============================================================================
// BindingError
// ============================================================================

/// Structural misconfiguration, found before any value is evaluated.
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("conditions cannot be empty")]
    NoConditions,

    #[error("field `{field}` is immutable after construction")]
    ImmutableField { field: &'static str },

    #[error("field `{field}` is shared at program level, setting it is not supported")]
    SharedField { field: &'static str },

    #[error(
        "constraint `{constraint}` on field `{field}` applies to {expected}, \
         which is not assignable from the field type `{found}`"
    )]
    IncompatibleConstraint {
        constraint: &'static str,
        field: &'static str,
        expected: TypeTag,
        found: &'static str,
    },

    #[error("no string constructor exists for `{type_name}`, consider a custom extractor")]
    NoStringConstructor { type_name: &'static str },

    #[error("extractor `{extractor}` cannot provide an extraction method: {message}")]
    Extractor {
        extractor: &'static str,
        message: String,
    },
}

// ============================================================================
// ConstructionError
// ============================================================================

/// A string constructor rejected its input.
///
/// Surfaces as the source of [`PropertyError::InvalidType`].
#[derive(Debug, Error)]
#[error("could not construct `{type_name}` from value `{value}`")]
pub struct ConstructionError {
    pub type_name: &'static str,
    pub value: String,
    #[source]
    pub source: BoxError,
}

// ============================================================================
// Diagnostic
// ============================================================================

/// Terminal rendering of a [`PropertyError`], see [`PropertyError::diagnostic`].
pub struct Diagnostic<'a>(&'a PropertyError);

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.0.key().unwrap_or("binding");
        writeln!(f, "{}{}{}", "[".dimmed(), label.cyan(), "]".dimmed())?;
        write!(f, "{} {}", "→".red(), self.0)?;

        let mut cause = self.0.source();
        while let Some(err) = cause {
            write!(f, "\n  {} {}", "caused by:".yellow(), err)?;
            cause = err.source();
        }
        Ok(())
    }
}
