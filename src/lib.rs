//! Propkit - typed, validated values from string-keyed configuration.
//!
//! A [`Source`] hands out raw strings by key. Propkit turns them into typed
//! values through a small pipeline:
//!
//! ```text
//! raw value ─► empty check ─► extract ─► validate ─► value
//!                  │             │           │
//!                  └─────────────┴───────────┴──► ConditionRegistry ─► fallback or error
//! ```
//!
//! | Module       | Purpose                                                   |
//! |--------------|-----------------------------------------------------------|
//! | `condition`  | Failure conditions and the behaviours that override them |
//! | `property`   | One evaluable value, and the typed [`PropertyReader`]     |
//! | `extract`    | String-to-value strategies, built-in parsers              |
//! | `constraint` | Type-tagged predicates checked at bind time               |
//! | `bind`       | Declarative field tables and [`bind()`]                   |
//!
//! # Example
//!
//! ```
//! use propkit::{Condition, ConditionRegistry, PropertyReader};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! let mut source = HashMap::new();
//! source.insert("port".to_string(), "not a port".to_string());
//!
//! let fallback = ConditionRegistry::new()
//!     .when([Condition::Empty, Condition::ParseFailed])?
//!     .then_return(8080);
//!
//! let port = PropertyReader::new(&source)
//!     .get_i32("port")
//!     .with_registry(Arc::new(fallback))
//!     .get()?;
//! assert_eq!(port, 8080);
//! # Ok::<(), propkit::PropertyError>(())
//! ```
//!
//! # Binding
//!
//! ```
//! use propkit::{NumberMustBePositive, Properties};
//! use std::collections::HashMap;
//!
//! #[derive(Debug, Default, Properties)]
//! #[property(section = "server")]
//! struct ServerConfig {
//!     #[property(constraints(NumberMustBePositive))]
//!     port: u16,
//!
//!     #[property(key = "bind-address")]
//!     host: String,
//!
//!     /// Not read from configuration.
//!     started: bool,
//! }
//!
//! let mut source = HashMap::new();
//! source.insert("server.port".to_string(), "443".to_string());
//! source.insert("server.bind-address".to_string(), "0.0.0.0".to_string());
//!
//! let config = ServerConfig::from_source(&source)?;
//! assert_eq!(config.port, 443);
//! assert_eq!(config.host, "0.0.0.0");
//! # Ok::<(), propkit::PropertyError>(())
//! ```

extern crate self as propkit;

pub mod logger;

mod bind;
mod condition;
mod constraint;
mod error;
mod extract;
mod property;
mod source;

pub use bind::{Access, FieldBinding, FieldSpec, FieldValue, Primitive, Properties, bind};
pub use condition::{Behavior, Condition, ConditionRegistry, Setting, Task};
pub use constraint::{
    Constraint, NumberMustBeNegative, NumberMustBePositive, NumberMustNotBeNegative,
    NumberMustNotBePositive, TextMustNotBeBlank, TypeTag, downcast_value,
};
pub use error::{BindingError, BoxError, ConstructionError, Diagnostic, PropertyError};
pub use extract::{
    Extraction, Extractor, GenericExtractor, PropertyValue, TolerantGenericExtractor, ValueKind,
};
pub use property::{Evaluation, ExtractFn, Predicate, Property, PropertyReader};
pub use source::Source;

/// Derive macro generating the [`Properties`](trait@Properties) binding table.
pub use macros::Properties;
