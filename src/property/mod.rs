//! Property evaluation.
//!
//! A [`Property`] turns one raw string into a typed, validated value:
//!
//! ```text
//! Start ─► EmptyCheck ─► Parse ─► Validate ─► Done
//!              │           │          │
//!              ▼           ▼          ▼
//!          Empty     ParseFailed   Invalid  ─► registry lookup
//! ```
//!
//! The first condition hit short-circuits every later step, so at most one
//! behaviour applies per [`Property::get`] call.

mod reader;

pub use reader::PropertyReader;

use crate::condition::{Condition, ConditionRegistry};
use crate::error::{BoxError, PropertyError};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// ExtractFn / Predicate
// ============================================================================

/// Conversion from a raw string to `T`.
pub struct ExtractFn<T>(Arc<dyn Fn(&str) -> Result<T, BoxError> + Send + Sync>);

impl<T: 'static> ExtractFn<T> {
    pub fn new<F, E>(f: F) -> Self
    where
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self(Arc::new(move |raw: &str| f(raw).map_err(Into::<BoxError>::into)))
    }

    #[inline]
    pub fn call(&self, raw: &str) -> Result<T, BoxError> {
        (self.0)(raw)
    }

    /// Post-process every successfully extracted value.
    pub fn map<U, F>(self, f: F) -> ExtractFn<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let inner = self.0;
        ExtractFn(Arc::new(move |raw: &str| inner(raw).map(&f)))
    }
}

impl<T> Clone for ExtractFn<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> fmt::Debug for ExtractFn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExtractFn(..)")
    }
}

/// A constraint on an extracted value.
///
/// Returning `Err` counts the same as returning `false`.
pub struct Predicate<T>(Arc<dyn Fn(&T) -> Result<bool, BoxError> + Send + Sync>);

impl<T: 'static> Predicate<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(move |value: &T| Ok::<bool, BoxError>(f(value))))
    }

    pub fn fallible<F, E>(f: F) -> Self
    where
        F: Fn(&T) -> Result<bool, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self(Arc::new(move |value: &T| f(value).map_err(Into::<BoxError>::into)))
    }

    #[inline]
    pub fn test(&self, value: &T) -> Result<bool, BoxError> {
        (self.0)(value)
    }

    /// Lift onto `Option<T>`; an absent value always passes.
    pub fn optional(self) -> Predicate<Option<T>> {
        let inner = self.0;
        Predicate(Arc::new(move |value: &Option<T>| match value {
            Some(value) => inner(value),
            None => Ok(true),
        }))
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Outcome of running the pipeline, before any registry lookup.
#[derive(Debug)]
pub enum Evaluation<T> {
    Value(T),
    Empty,
    ParseFailed(BoxError),
    Invalid(Option<BoxError>),
}

impl<T> Evaluation<T> {
    pub fn condition(&self) -> Option<Condition> {
        match self {
            Self::Value(_) => None,
            Self::Empty => Some(Condition::Empty),
            Self::ParseFailed(_) => Some(Condition::ParseFailed),
            Self::Invalid(_) => Some(Condition::Invalid),
        }
    }
}

// ============================================================================
// Property
// ============================================================================

/// One raw configuration value, ready to be evaluated.
pub struct Property<T> {
    key: String,
    value: Option<String>,
    extractor: ExtractFn<T>,
    constraints: Vec<Predicate<T>>,
    registry: Option<Arc<ConditionRegistry<T>>>,
}

impl<T: 'static> Property<T> {
    pub fn new(key: impl Into<String>, value: Option<String>, extractor: ExtractFn<T>) -> Self {
        Self {
            key: key.into(),
            value,
            extractor,
            constraints: Vec::new(),
            registry: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn raw_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn with_registry(mut self, registry: Arc<ConditionRegistry<T>>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Append a constraint; `None` is ignored.
    pub fn add_constraint(&mut self, constraint: impl Into<Option<Predicate<T>>>) -> &mut Self {
        if let Some(constraint) = constraint.into() {
            self.constraints.push(constraint);
        }
        self
    }

    pub fn with_constraints<I>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = Option<Predicate<T>>>,
    {
        for constraint in constraints {
            self.add_constraint(constraint);
        }
        self
    }

    pub fn constrain<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.add_constraint(Predicate::new(f));
        self
    }

    pub fn constrain_with<F, E>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> Result<bool, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.add_constraint(Predicate::fallible(f));
        self
    }

    /// Run the pipeline without consulting the registry.
    pub fn evaluate(&self) -> Evaluation<T> {
        let raw = match self.value.as_deref() {
            None | Some("") => return Evaluation::Empty,
            Some(raw) => raw,
        };

        let parsed = match self.extractor.call(raw) {
            Ok(parsed) => parsed,
            Err(cause) => return Evaluation::ParseFailed(cause),
        };

        for constraint in &self.constraints {
            match constraint.test(&parsed) {
                Ok(true) => {}
                Ok(false) => return Evaluation::Invalid(None),
                Err(cause) => return Evaluation::Invalid(Some(cause)),
            }
        }

        Evaluation::Value(parsed)
    }

    /// Evaluate, resolving any failure through the attached registry.
    pub fn get(&self) -> Result<T, PropertyError>
    where
        T: Clone,
    {
        let raw = || self.value.clone().unwrap_or_default();
        match self.evaluate() {
            Evaluation::Value(value) => Ok(value),
            Evaluation::Empty => self.fall_back(
                Condition::Empty,
                PropertyError::Missing {
                    key: self.key.clone(),
                },
            ),
            Evaluation::ParseFailed(source) => self.fall_back(
                Condition::ParseFailed,
                PropertyError::InvalidType {
                    key: self.key.clone(),
                    value: raw(),
                    source,
                },
            ),
            Evaluation::Invalid(source) => self.fall_back(
                Condition::Invalid,
                PropertyError::Validation {
                    key: self.key.clone(),
                    value: raw(),
                    source,
                },
            ),
        }
    }

    fn fall_back(&self, condition: Condition, error: PropertyError) -> Result<T, PropertyError>
    where
        T: Clone,
    {
        match &self.registry {
            Some(registry) => registry.apply(condition, &self.key, self.value.as_deref(), error),
            None => Err(error),
        }
    }
}

impl<T> fmt::Display for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {}", self.key, value),
            None => write!(f, "{}: <absent>", self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn int_property(value: Option<&str>) -> Property<i32> {
        Property::new(
            "intKey",
            value.map(str::to_string),
            ExtractFn::new(|raw: &str| raw.parse::<i32>()),
        )
    }

    #[test]
    fn test_value_passes_through() {
        let property = int_property(Some("12352"));
        assert_eq!(property.get().unwrap(), 12352);
    }

    #[test]
    fn test_absent_value_is_missing() {
        let err = int_property(None).get().unwrap_err();
        assert!(matches!(err, PropertyError::Missing { ref key } if key == "intKey"));
    }

    #[test]
    fn test_empty_string_is_missing() {
        let err = int_property(Some("")).get().unwrap_err();
        assert_eq!(err.condition(), Some(Condition::Empty));
    }

    #[test]
    fn test_parse_failure_is_invalid_type() {
        let err = int_property(Some("notAnInt")).get().unwrap_err();
        match err {
            PropertyError::InvalidType { key, value, source } => {
                assert_eq!(key, "intKey");
                assert_eq!(value, "notAnInt");
                assert!(source.to_string().contains("invalid digit"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failed_constraint_is_validation_error() {
        let property = int_property(Some("43")).constrain(|value| *value < 40);
        let err = property.get().unwrap_err();
        assert!(matches!(err, PropertyError::Validation { source: None, .. }));
    }

    #[test]
    fn test_erroring_constraint_behaves_like_false() {
        let property = int_property(Some("43"))
            .constrain_with(|_: &i32| Err::<bool, _>("predicate exploded"));
        assert!(matches!(property.evaluate(), Evaluation::Invalid(Some(_))));

        let err = property.get().unwrap_err();
        match err {
            PropertyError::Validation {
                source: Some(source),
                ..
            } => assert_eq!(source.to_string(), "predicate exploded"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_first_failing_constraint_stops_validation() {
        let later = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&later);

        let property = int_property(Some("5"))
            .constrain(|value| *value > 10)
            .constrain(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            });

        assert_eq!(property.evaluate().condition(), Some(Condition::Invalid));
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_absent_constraints_are_ignored() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counting = Predicate::new(move |_: &i32| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        let property = int_property(Some("7")).with_constraints([None, Some(counting), None]);
        assert_eq!(property.constraint_count(), 1);
        assert_eq!(property.get().unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_registry_overrides_parse_failure() {
        let seen = Arc::new(Mutex::new(None));
        let recorder = Arc::clone(&seen);
        let registry = ConditionRegistry::new()
            .when([Condition::ParseFailed])
            .unwrap()
            .then_do(move |key, value| {
                *recorder.lock().unwrap() = Some((key.to_string(), value.map(str::to_string)));
            })
            .then_return(0);

        let property = int_property(Some("notAnInt")).with_registry(Arc::new(registry));
        assert_eq!(property.get().unwrap(), 0);
        assert_eq!(
            *seen.lock().unwrap(),
            Some(("intKey".to_string(), Some("notAnInt".to_string())))
        );
    }

    #[test]
    #[should_panic(expected = "task exploded")]
    fn test_panicking_task_unwinds_out_of_get() {
        let registry = ConditionRegistry::new()
            .when([Condition::Empty])
            .unwrap()
            .then_do(|_, _| panic!("task exploded"))
            .then_return(7);

        let property = int_property(None).with_registry(Arc::new(registry));
        let _ = property.get();
    }

    #[test]
    fn test_registry_without_matching_condition_raises_default_error() {
        let registry = ConditionRegistry::new()
            .when([Condition::Invalid])
            .unwrap()
            .then_return(-1);

        let property = int_property(None).with_registry(Arc::new(registry));
        let err = property.get().unwrap_err();
        assert!(matches!(err, PropertyError::Missing { .. }));
    }

    #[test]
    fn test_only_first_condition_applies() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = ConditionRegistry::new()
            .when(Condition::ALL)
            .unwrap()
            .then_do(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .then_return(-1);

        // Unparsable, and would also fail the constraint if it parsed.
        let property = int_property(Some("x"))
            .constrain(|_| false)
            .with_registry(Arc::new(registry));
        assert_eq!(property.get().unwrap(), -1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let property = int_property(Some("41")).constrain(|value| *value % 2 == 1);
        assert_eq!(property.get().unwrap(), 41);
        assert_eq!(property.get().unwrap(), 41);
    }

    #[test]
    fn test_display() {
        assert_eq!(int_property(Some("1")).to_string(), "intKey: 1");
        assert_eq!(int_property(None).to_string(), "intKey: <absent>");
    }
}
