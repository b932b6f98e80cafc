//! Declarative field binding.
//!
//! A bindable struct lists its fields as [`FieldBinding`] entries, usually
//! generated by `#[derive(Properties)]`. [`bind`] walks that table in order:
//!
//! 1. reject immutable and shared fields
//! 2. instantiate the field's [`Extractor`] and get its extraction function
//! 3. resolve every constraint against the field's value type
//! 4. evaluate the raw value, with the extractor's registry attached
//! 5. write the result through [`FieldValue`]
//!
//! The first failure aborts the bind call.
//!
//! # Example
//!
//! ```
//! use propkit::{FieldBinding, NumberMustNotBeNegative, Properties, TolerantGenericExtractor};
//! use std::collections::HashMap;
//!
//! #[derive(Default)]
//! struct Limits {
//!     retries: u32,
//!     timeout: Option<f64>,
//! }
//!
//! impl Properties for Limits {
//!     fn bindings() -> Vec<FieldBinding<Self>> {
//!         vec![
//!             FieldBinding::field("retries", |limits: &mut Self| &mut limits.retries)
//!                 .extractor::<TolerantGenericExtractor>()
//!                 .build(),
//!             FieldBinding::field("timeout", |limits: &mut Self| &mut limits.timeout)
//!                 .key("limits.timeout")
//!                 .constraint::<NumberMustNotBeNegative>()
//!                 .build(),
//!         ]
//!     }
//! }
//!
//! let source = HashMap::from([("limits.timeout".to_string(), "2.5".to_string())]);
//! let limits = Limits::from_source(&source)?;
//! assert_eq!(limits.retries, 0);
//! assert_eq!(limits.timeout, Some(2.5));
//! # Ok::<(), propkit::PropertyError>(())
//! ```

mod value;


pub use value::{FieldValue, Primitive};

use crate::constraint::{self, Constraint};
use crate::error::{BindingError, PropertyError};
use crate::extract::{Extractor, GenericExtractor};
use crate::property::{Predicate, Property};
use crate::source::Source;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

// ============================================================================
// Properties
// ============================================================================

/// A struct whose fields can be populated from a [`Source`].
pub trait Properties: Sized + 'static {
    /// Binding table, in declaration order.
    fn bindings() -> Vec<FieldBinding<Self>>;

    /// Bind a default instance.
    fn from_source<S: Source + ?Sized>(source: &S) -> Result<Self, PropertyError>
    where
        Self: Default,
    {
        let mut target = Self::default();
        bind(&mut target, source)?;
        Ok(target)
    }
}

/// Populate every bound field of `target` from `source`.
///
/// Fails fast: fields after the first failing one are not touched, fields
/// before it keep their new values.
pub fn bind<T: Properties, S: Source + ?Sized>(
    target: &mut T,
    source: &S,
) -> Result<(), PropertyError> {
    let source: &dyn Source = &source;
    for binding in T::bindings() {
        binding.bind(target, source)?;
    }
    Ok(())
}

// ============================================================================
// FieldBinding
// ============================================================================

/// Whether a field may be written after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Settable,
    /// Borrowed or reference-counted data, fixed once the struct exists.
    Immutable,
    /// A `'static` reference shared by the whole program.
    Shared,
}

enum Slot<S> {
    Settable(Box<dyn BindField<S>>),
    Immutable,
    Shared,
}

/// One entry of a binding table.
pub struct FieldBinding<S> {
    field: &'static str,
    key: String,
    slot: Slot<S>,
}

impl<S: 'static> FieldBinding<S> {
    /// Start a settable field entry, keyed by its name and using the
    /// [`GenericExtractor`] until told otherwise.
    pub fn field<F: FieldValue>(
        field: &'static str,
        accessor: fn(&mut S) -> &mut F,
    ) -> FieldSpec<S, F, GenericExtractor> {
        FieldSpec {
            field,
            key: None,
            accessor,
            constraints: Vec::new(),
            extractor: PhantomData,
        }
    }

    pub fn immutable(field: &'static str) -> Self {
        Self {
            field,
            key: field.to_string(),
            slot: Slot::Immutable,
        }
    }

    pub fn shared(field: &'static str) -> Self {
        Self {
            field,
            key: field.to_string(),
            slot: Slot::Shared,
        }
    }

    fn bind(&self, target: &mut S, source: &dyn Source) -> Result<(), PropertyError> {
        match &self.slot {
            Slot::Settable(binder) => binder.bind(self.field, &self.key, target, source),
            Slot::Immutable => Err(BindingError::ImmutableField { field: self.field }.into()),
            Slot::Shared => Err(BindingError::SharedField { field: self.field }.into()),
        }
    }
}

impl<S> FieldBinding<S> {
    pub fn field_name(&self) -> &'static str {
        self.field
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn access(&self) -> Access {
        match self.slot {
            Slot::Settable(_) => Access::Settable,
            Slot::Immutable => Access::Immutable,
            Slot::Shared => Access::Shared,
        }
    }
}

impl<S> fmt::Debug for FieldBinding<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("field", &self.field)
            .field("key", &self.key)
            .field("access", &self.access())
            .finish()
    }
}

// ============================================================================
// FieldSpec
// ============================================================================

type ResolveConstraint<V> = fn(&'static str) -> Result<Predicate<V>, BindingError>;

/// Builder for a settable [`FieldBinding`].
pub struct FieldSpec<S, F: FieldValue, E> {
    field: &'static str,
    key: Option<String>,
    accessor: fn(&mut S) -> &mut F,
    constraints: Vec<ResolveConstraint<F::Value>>,
    extractor: PhantomData<fn() -> E>,
}

impl<S, F, E> FieldSpec<S, F, E>
where
    S: 'static,
    F: FieldValue,
    E: Extractor<F::Value>,
{
    /// Override the key, which defaults to the field name.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn extractor<X: Extractor<F::Value>>(self) -> FieldSpec<S, F, X> {
        FieldSpec {
            field: self.field,
            key: self.key,
            accessor: self.accessor,
            constraints: self.constraints,
            extractor: PhantomData,
        }
    }

    /// Append a constraint; constraints are checked in the order added.
    pub fn constraint<C: Constraint>(mut self) -> Self {
        self.constraints.push(constraint::resolve::<C, F::Value>);
        self
    }

    pub fn build(self) -> FieldBinding<S> {
        let key = self.key.unwrap_or_else(|| self.field.to_string());
        FieldBinding {
            field: self.field,
            key,
            slot: Slot::Settable(Box::new(FieldBinder::<S, F, E> {
                accessor: self.accessor,
                constraints: self.constraints,
                extractor: PhantomData,
            })),
        }
    }
}

// ============================================================================
// FieldBinder
// ============================================================================

trait BindField<S> {
    fn bind(
        &self,
        field: &'static str,
        key: &str,
        target: &mut S,
        source: &dyn Source,
    ) -> Result<(), PropertyError>;
}

struct FieldBinder<S, F: FieldValue, E> {
    accessor: fn(&mut S) -> &mut F,
    constraints: Vec<ResolveConstraint<F::Value>>,
    extractor: PhantomData<fn() -> E>,
}

impl<S, F, E> BindField<S> for FieldBinder<S, F, E>
where
    F: FieldValue,
    E: Extractor<F::Value>,
{
    fn bind(
        &self,
        field: &'static str,
        key: &str,
        target: &mut S,
        source: &dyn Source,
    ) -> Result<(), PropertyError> {
        let extractor = E::default();
        let extract = extractor.extraction_method()?;

        let constraints = self
            .constraints
            .iter()
            .map(|resolve| resolve(field).map(|predicate| Some(predicate.optional())))
            .collect::<Result<Vec<_>, _>>()?;

        let raw = source.lookup(key).map(str::to_owned);
        let mut property = Property::new(key, raw, extract.map(Some)).with_constraints(constraints);
        if let Some(registry) = extractor.default_settings() {
            property = property.with_registry(Arc::new(registry));
        }

        match F::from_evaluated(property.get()?) {
            Some(value) => {
                *(self.accessor)(target) = value;
                crate::debug!("bind"; "{} <- `{}`", field, key);
            }
            None => {
                crate::log!("warning"; "`{}` has no value, field `{}` left untouched", key, field);
            }
        }
        Ok(())
    }
}
