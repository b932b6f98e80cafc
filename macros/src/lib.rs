//! Proc macros for propkit.
//!
//! # Properties derive macro
//!
//! Generates the binding table consumed by `propkit::bind`.
//!
//! ```ignore
//! #[derive(Default, Properties)]
//! #[property(section = "db")]
//! pub struct DatabaseConfig {
//!     /// Bound from `db.host`.
//!     #[property]
//!     pub host: String,
//!
//!     /// Bound from `db.max-connections`, must be positive.
//!     #[property(key = "max-connections", constraints(NumberMustBePositive))]
//!     pub pool_size: u32,
//!
//!     /// Falls back to `None` on any failure.
//!     #[property(extractor = TolerantGenericExtractor)]
//!     pub timeout: Option<f64>,
//!
//!     /// Not bound.
//!     pub connected: bool,
//! }
//! ```
//!
//! # Attributes
//!
//! Struct-level:
//! - `#[property(section = "path")]` - Prefix joined with `.` onto every key
//!
//! Field-level:
//! - `#[property]` - Bind the field, keyed by its name
//! - `#[property(key = "x")]` - Custom key
//! - `#[property(extractor = path::Type)]` - Extraction strategy
//! - `#[property(constraints(path::A, path::B))]` - Constraints, checked in order
//!
//! # Field access
//!
//! `Rc<T>` and `Arc<T>` fields are immutable, `&'static T` fields are shared.
//! Both are kept in the table so binding them fails with a descriptive error.

mod properties;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro that generates `Properties::bindings()`.
#[proc_macro_derive(Properties, attributes(property))]
pub fn derive_properties(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    properties::derive(&input).into()
}
