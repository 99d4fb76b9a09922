//! Typed key/value payload carried through every navigation call.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use super::error::{NavigationError, Result};

/// A stored parameter value. Shared, so cloning a bag is a shallow copy.
pub type ParameterValue = Arc<dyn Any + Send + Sync>;

/// Ordered string-keyed map of arbitrary values.
///
/// Keys are unique: setting an existing key replaces its value in place.
/// Typed reads return `None` both when the key is missing and when the stored
/// value has a different runtime type.
#[derive(Clone, Default)]
pub struct ParameterBag {
    entries: IndexMap<String, ParameterValue>,
}

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow copy of an existing key/value collection
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, ParameterValue)>,
        K: Into<String>,
    {
        let mut bag = Self::new();
        for (key, value) in entries {
            bag.set_value(key, value);
        }
        bag
    }

    /// Build a bag from a JSON object.
    ///
    /// Strings become `String`, integers `i64` (or `u64` above `i64::MAX`),
    /// other numbers `f64`, booleans `bool`; arrays, objects and nulls are
    /// stored as `serde_json::Value`.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| NavigationError::InvalidArgument {
            name: "parameters",
            reason: format!("expected a JSON object, got {}", value),
        })?;

        let mut bag = Self::new();
        for (key, value) in object {
            match value {
                Value::String(s) => bag.set(key.as_str(), s.clone()),
                Value::Bool(b) => bag.set(key.as_str(), *b),
                Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        bag.set(key.as_str(), i);
                    } else if let Some(u) = n.as_u64() {
                        bag.set(key.as_str(), u);
                    } else {
                        bag.set(key.as_str(), n.as_f64().unwrap_or(f64::NAN));
                    }
                }
                other => bag.set(key.as_str(), other.clone()),
            }
        }
        Ok(bag)
    }

    /// Builder form of [`ParameterBag::set`]
    pub fn with<V>(mut self, key: impl Into<String>, value: V) -> Self
    where
        V: Any + Send + Sync,
    {
        self.set(key, value);
        self
    }

    pub fn set<V>(&mut self, key: impl Into<String>, value: V)
    where
        V: Any + Send + Sync,
    {
        self.set_value(key, Arc::new(value));
    }

    /// Store an already shared value
    pub fn set_value(&mut self, key: impl Into<String>, value: ParameterValue) {
        self.entries.insert(key.into(), value);
    }

    /// Typed read. A value of another type is reported as absent.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.get_raw(key)?.downcast_ref::<T>()
    }

    pub fn get_cloned<T: Any + Clone>(&self, key: &str) -> Option<T> {
        self.get::<T>(key).cloned()
    }

    /// Untyped read
    pub fn get_raw(&self, key: &str) -> Option<&(dyn Any + Send + Sync)> {
        self.entries.get(key).map(|value| &**value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns true if the key was present. Remaining keys keep their order.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.shift_remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'a> IntoIterator for &'a ParameterBag {
    type Item = (String, ParameterValue);
    type IntoIter = std::iter::Map<
        indexmap::map::Iter<'a, String, ParameterValue>,
        fn((&'a String, &'a ParameterValue)) -> (String, ParameterValue),
    >;

    fn into_iter(self) -> Self::IntoIter {
        let share: fn((&'a String, &'a ParameterValue)) -> (String, ParameterValue) =
            |(key, value)| (key.clone(), Arc::clone(value));
        self.entries.iter().map(share)
    }
}

impl fmt::Debug for ParameterBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_get_round_trip() {
        let mut bag = ParameterBag::new();
        bag.set("x", 42);

        assert_eq!(bag.get::<i32>("x"), Some(&42));
        assert_eq!(bag.get_cloned::<i32>("x"), Some(42));
    }

    #[test]
    fn test_wrong_type_is_absent() {
        let bag = ParameterBag::new().with("x", 42);

        assert!(bag.get::<String>("x").is_none());
        assert!(bag.get::<i64>("x").is_none());
        assert!(bag.contains_key("x"));
    }

    #[test]
    fn test_last_write_wins_keeps_position() {
        let mut bag = ParameterBag::new()
            .with("first", 1)
            .with("second", 2);
        bag.set("first", "replaced".to_string());

        assert_eq!(bag.len(), 2);
        assert_eq!(bag.keys().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(bag.get::<String>("first").map(String::as_str), Some("replaced"));
        assert!(bag.get::<i32>("first").is_none());
    }

    #[test]
    fn test_remove() {
        let mut bag = ParameterBag::new().with("a", true);

        assert!(bag.remove("a"));
        assert!(!bag.remove("a"));
        assert!(bag.is_empty());
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut bag = ParameterBag::new()
            .with("a", 1)
            .with("b", 2)
            .with("c", 3)
            .with("d", 4);

        assert!(bag.remove("b"));
        assert_eq!(bag.keys().collect::<Vec<_>>(), vec!["a", "c", "d"]);
        assert_eq!(bag.get::<i32>("d"), Some(&4));

        bag.set("b", 5);
        assert_eq!(bag.keys().collect::<Vec<_>>(), vec!["a", "c", "d", "b"]);
    }

    #[test]
    fn test_from_entries_is_shallow_copy() {
        let original = ParameterBag::new()
            .with("name", "Ada".to_string())
            .with("count", 3u32);
        let mut copy = ParameterBag::from_entries(&original);
        copy.set("extra", 1.5f64);

        assert_eq!(original.len(), 2);
        assert_eq!(copy.len(), 3);
        assert_eq!(copy.get::<u32>("count"), Some(&3));

        let a = original.iter().find(|(k, _)| *k == "name").map(|(_, v)| Arc::clone(v));
        let b = copy.iter().find(|(k, _)| *k == "name").map(|(_, v)| Arc::clone(v));
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
    }

    #[test]
    fn test_from_json() {
        let bag = ParameterBag::from_json(&json!({
            "message": "hello",
            "count": 7,
            "ratio": 0.5,
            "flag": true,
            "tags": ["a", "b"]
        }))
        .unwrap();

        assert_eq!(bag.get::<String>("message").map(String::as_str), Some("hello"));
        assert_eq!(bag.get::<i64>("count"), Some(&7));
        assert_eq!(bag.get::<f64>("ratio"), Some(&0.5));
        assert_eq!(bag.get::<bool>("flag"), Some(&true));
        assert_eq!(bag.get::<Value>("tags"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_from_json_large_unsigned() {
        let bag = ParameterBag::from_json(&json!({ "id": u64::MAX, "small": 5 })).unwrap();

        assert_eq!(bag.get::<u64>("id"), Some(&u64::MAX));
        assert!(bag.get::<f64>("id").is_none());
        assert_eq!(bag.get::<i64>("small"), Some(&5));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = ParameterBag::from_json(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, NavigationError::InvalidArgument { name: "parameters", .. }));
    }
}
