//! Raw string lookup consumed by the evaluator and binder.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A pre-populated, string-keyed configuration store.
pub trait Source {
    /// Raw value for `key`, `None` when absent.
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl<H: BuildHasher> Source for HashMap<String, String, H> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<H: BuildHasher> Source for HashMap<&str, &str, H> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).copied()
    }
}

impl Source for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<T: Source + ?Sized> Source for &T {
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}
