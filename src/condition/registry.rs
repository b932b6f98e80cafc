//! Condition registry.
//!
//! Built once, then shared read-only across evaluations through an `Arc`.
//!
//! ```ignore
//! let registry = ConditionRegistry::new()
//!     .when([Condition::ParseFailed])?
//!     .then_do(|key, value| eprintln!("bad value for {key}: {value:?}"))
//!     .then_return(0);
//! ```

use super::Condition;
use crate::error::{BindingError, PropertyError};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::sync::Arc;

/// Side effect run when a behaviour applies, receives `(key, raw value)`.
pub type Task = Arc<dyn Fn(&str, Option<&str>) + Send + Sync>;

// ============================================================================
// Behavior
// ============================================================================

/// Override for a condition: an optional task and the value to return.
pub struct Behavior<T> {
    task: Option<Task>,
    value: T,
}

impl<T> Behavior<T> {
    pub fn task(&self) -> Option<&Task> {
        self.task.as_ref()
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Behavior<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("task", &self.task.as_ref().map(|_| "<fn>"))
            .field("value", &self.value)
            .finish()
    }
}

// ============================================================================
// ConditionRegistry
// ============================================================================

/// Mapping from [`Condition`] to [`Behavior`].
///
/// Conditions registered together share one behaviour. Registering a
/// condition again replaces its behaviour entirely.
pub struct ConditionRegistry<T> {
    behaviors: FxHashMap<Condition, Arc<Behavior<T>>>,
}

impl<T> ConditionRegistry<T> {
    pub fn new() -> Self {
        Self {
            behaviors: FxHashMap::default(),
        }
    }

    /// Registry returning `value` for every condition, without a task.
    pub fn always(value: T) -> Self {
        let mut registry = Self::new();
        registry.insert(Condition::ALL, None, value);
        registry
    }

    /// Start a fluent registration for `conditions`.
    ///
    /// Nothing is stored until [`Setting::then_return`] is called. The
    /// registry is consumed, so an `Err` drops it together with every
    /// behaviour registered so far; use [`ConditionRegistry::register`] to
    /// keep it on failure.
    pub fn when<I>(self, conditions: I) -> Result<Setting<T>, BindingError>
    where
        I: IntoIterator<Item = Condition>,
    {
        let conditions: FxHashSet<Condition> = conditions.into_iter().collect();
        if conditions.is_empty() {
            return Err(BindingError::NoConditions);
        }
        Ok(Setting {
            registry: self,
            conditions,
            task: None,
        })
    }

    /// Associate every condition in `conditions` with one behaviour.
    pub fn register<I>(
        &mut self,
        conditions: I,
        task: Option<Task>,
        value: T,
    ) -> Result<(), BindingError>
    where
        I: IntoIterator<Item = Condition>,
    {
        let conditions: FxHashSet<Condition> = conditions.into_iter().collect();
        if conditions.is_empty() {
            return Err(BindingError::NoConditions);
        }
        self.insert(conditions, task, value);
        Ok(())
    }

    fn insert(&mut self, conditions: impl IntoIterator<Item = Condition>, task: Option<Task>, value: T) {
        let behavior = Arc::new(Behavior { task, value });
        for condition in conditions {
            self.behaviors.insert(condition, Arc::clone(&behavior));
        }
    }

    pub fn behavior(&self, condition: Condition) -> Option<&Behavior<T>> {
        self.behaviors.get(&condition).map(Arc::as_ref)
    }

    pub fn contains(&self, condition: Condition) -> bool {
        self.behaviors.contains_key(&condition)
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Resolve `condition`: run the task and return the value, or give
    /// back `fallback` unchanged when nothing is registered.
    pub fn apply(
        &self,
        condition: Condition,
        key: &str,
        value: Option<&str>,
        fallback: PropertyError,
    ) -> Result<T, PropertyError>
    where
        T: Clone,
    {
        let Some(behavior) = self.behaviors.get(&condition) else {
            return Err(fallback);
        };

        crate::debug!("condition"; "`{}` is {}, applying registered behaviour", key, condition);
        if let Some(task) = &behavior.task {
            task(key, value);
        }
        Ok(behavior.value.clone())
    }
}

impl<T> Default for ConditionRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ConditionRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            behaviors: self.behaviors.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ConditionRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.behaviors.iter().collect();
        entries.sort_by_key(|(condition, _)| **condition);
        f.debug_map().entries(entries).finish()
    }
}

// ============================================================================
// Setting
// ============================================================================

/// Pending registration created by [`ConditionRegistry::when`].
#[must_use = "nothing is registered until `then_return` is called"]
pub struct Setting<T> {
    registry: ConditionRegistry<T>,
    conditions: FxHashSet<Condition>,
    task: Option<Task>,
}

impl<T> Setting<T> {
    /// Run `task` with `(key, raw value)` whenever the behaviour applies.
    pub fn then_do<F>(mut self, task: F) -> Self
    where
        F: Fn(&str, Option<&str>) + Send + Sync + 'static,
    {
        self.task = Some(Arc::new(task));
        self
    }

    /// Commit the behaviour and hand back the registry.
    pub fn then_return(self, value: T) -> ConditionRegistry<T> {
        let Self {
            mut registry,
            conditions,
            task,
        } = self;
        registry.insert(conditions, task, value);
        registry
    }
}
