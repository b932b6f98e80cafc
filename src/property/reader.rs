//! Typed access to a [`Source`].

use super::{ExtractFn, Property};
use crate::error::{BindingError, BoxError};
use crate::extract::{self, PropertyValue, parse_bool, parse_exact, parse_float};
use crate::source::Source;

/// Builds [`Property`] values from keys of one source.
///
/// Every getter snapshots the raw value at call time; the returned property
/// can then be decorated with constraints and a registry before `get()`.
#[derive(Debug, Clone, Copy)]
pub struct PropertyReader<'a, S: Source + ?Sized> {
    source: &'a S,
}

macro_rules! typed_getters {
    ($($name:ident: $ty:ty => $parse:path),* $(,)?) => {
        $(
            #[doc = concat!("Property parsed as `", stringify!($ty), "`.")]
            pub fn $name(&self, key: &str) -> Property<$ty> {
                self.with_extractor(key, ExtractFn::new($parse))
            }
        )*
    };
}

impl<'a, S: Source + ?Sized> PropertyReader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    typed_getters! {
        get_i8: i8 => parse_exact::<i8>,
        get_i16: i16 => parse_exact::<i16>,
        get_i32: i32 => parse_exact::<i32>,
        get_i64: i64 => parse_exact::<i64>,
        get_f32: f32 => parse_float::<f32>,
        get_f64: f64 => parse_float::<f64>,
        get_bool: bool => parse_bool,
    }

    pub fn get_string(&self, key: &str) -> Property<String> {
        self.with_extractor(key, ExtractFn::new(|raw: &str| Ok::<_, BoxError>(raw.to_owned())))
    }

    /// Property converted by an arbitrary extraction function.
    pub fn get_custom<T, F, E>(&self, key: &str, extract: F) -> Property<T>
    where
        T: 'static,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.with_extractor(key, ExtractFn::new(extract))
    }

    /// Property converted by the generic extractor for `T`.
    ///
    /// Fails immediately when `T` has no string constructor.
    pub fn get<T: PropertyValue>(&self, key: &str) -> Result<Property<T>, BindingError> {
        let extractor = extract::resolve::<T>()?;
        Ok(self.with_extractor(key, extractor))
    }

    pub fn with_extractor<T: 'static>(&self, key: &str, extractor: ExtractFn<T>) -> Property<T> {
        let raw = self.source.lookup(key).map(str::to_owned);
        Property::new(key, raw, extractor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::error::PropertyError;
    use rustc_hash::FxHashMap;

    fn source() -> FxHashMap<String, String> {
        [
            ("byte", "-7"),
            ("short", "1024"),
            ("int", "12352"),
            ("long", "9000000000"),
            ("float", "0.5"),
            ("double", "-2.25"),
            ("flag", "true"),
            ("shouting", "TRUE"),
            ("padded", " 1.5 "),
            ("name", "propkit"),
            ("empty", ""),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_typed_getters() {
        let source = source();
        let reader = PropertyReader::new(&source);

        assert_eq!(reader.get_i8("byte").get().unwrap(), -7);
        assert_eq!(reader.get_i16("short").get().unwrap(), 1024);
        assert_eq!(reader.get_i32("int").get().unwrap(), 12352);
        assert_eq!(reader.get_i64("long").get().unwrap(), 9_000_000_000);
        assert_eq!(reader.get_f32("float").get().unwrap(), 0.5);
        assert_eq!(reader.get_f64("double").get().unwrap(), -2.25);
        assert!(reader.get_bool("flag").get().unwrap());
        assert_eq!(reader.get_string("name").get().unwrap(), "propkit");
    }

    #[test]
    fn test_lenient_bool_and_float_getters() {
        let source = source();
        let reader = PropertyReader::new(&source);
        assert!(reader.get_bool("shouting").get().unwrap());
        assert_eq!(reader.get_f64("padded").get().unwrap(), 1.5);
        assert_eq!(reader.get::<f32>("padded").unwrap().get().unwrap(), 1.5);
        assert!(reader.get_i32("padded").get().is_err());
    }

    #[test]
    fn test_missing_and_empty_keys() {
        let source = source();
        let reader = PropertyReader::new(&source);

        let absent = reader.get_i32("nope");
        assert_eq!(absent.raw_value(), None);
        assert_eq!(absent.get().unwrap_err().condition(), Some(Condition::Empty));

        let empty = reader.get_string("empty");
        assert_eq!(empty.raw_value(), Some(""));
        assert!(matches!(empty.get(), Err(PropertyError::Missing { .. })));
    }

    #[test]
    fn test_narrow_getter_rejects_overflow() {
        let source = source();
        let err = PropertyReader::new(&source).get_i8("short").get().unwrap_err();
        assert_eq!(err.condition(), Some(Condition::ParseFailed));
    }

    #[test]
    fn test_custom_extraction_function() {
        let source = source();
        let reader = PropertyReader::new(&source);
        let length = reader.get_custom("name", |raw: &str| Ok::<_, BoxError>(raw.len()));
        assert_eq!(length.get().unwrap(), 7);
    }

    #[test]
    fn test_generic_getter() {
        let source = source();
        let reader = PropertyReader::new(&source);
        assert_eq!(reader.get::<u64>("long").unwrap().get().unwrap(), 9_000_000_000);
        assert!(reader.get::<u8>("byte").unwrap().get().is_err());
    }

    #[test]
    fn test_reader_over_trait_object() {
        let source = source();
        let dynamic: &dyn Source = &source;
        let reader = PropertyReader::new(dynamic);
        assert_eq!(reader.get_i32("int").get().unwrap(), 12352);
    }
}
