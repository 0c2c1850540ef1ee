//! Ordered registry
//!
//! A name-keyed map that remembers first-insertion order. Every collection that
//! ends up as an array (or ordered map) in an OMF document is populated through
//! an [`OrderedRegistry`], so serialized output is identical across runs.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Name-keyed map plus the order in which each key was first inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedRegistry<T> {
    entries: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for OrderedRegistry<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T> OrderedRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.entries.get_mut(key)
    }

    /// Insert or replace an entry.
    ///
    /// A replaced entry keeps the position of its first insertion. Returns the
    /// previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: T) -> Option<T> {
        let key = key.into();
        if let Some(existing) = self.entries.get_mut(&key) {
            return Some(std::mem::replace(existing, value));
        }
        self.order.push(key.clone());
        self.entries.insert(key, value);
        None
    }

    /// Insert only if the key is not present yet (first write wins).
    ///
    /// Returns `true` when the value was stored.
    pub fn insert_first(&mut self, key: impl Into<String>, value: T) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.order.push(key.clone());
        self.entries.insert(key, value);
        true
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|value| (key.as_str(), value)))
    }

    /// Values in first-insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|(_, value)| value)
    }

    /// Split into the backing map and the order list.
    pub fn into_parts(self) -> (HashMap<String, T>, Vec<String>) {
        (self.entries, self.order)
    }

    /// Collapse into a sequence in first-insertion order.
    pub fn into_vec(self) -> Vec<T> {
        let (entries, order) = self.into_parts();
        collapse(entries, &order)
    }
}

impl<T> FromIterator<(String, T)> for OrderedRegistry<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (key, value) in iter {
            registry.insert(key, value);
        }
        registry
    }
}

/// Collapse a name-keyed map into a sequence.
///
/// Entries are emitted in `order`, skipping keys absent from the map; each key
/// is emitted at most once. With an empty `order` the iteration order of the
/// map is used, which is unspecified and differs between runs.
pub fn collapse<T>(mut entries: HashMap<String, T>, order: &[String]) -> Vec<T> {
    if order.is_empty() {
        return entries.into_values().collect();
    }
    order.iter().filter_map(|key| entries.remove(key)).collect()
}

impl<T: Serialize> Serialize for OrderedRegistry<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedRegistry<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RegistryVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for RegistryVisitor<T> {
            type Value = OrderedRegistry<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map keyed by name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut registry = OrderedRegistry::new();
                while let Some((key, value)) = access.next_entry::<String, T>()? {
                    registry.insert(key, value);
                }
                Ok(registry)
            }
        }

        deserializer.deserialize_map(RegistryVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut registry = OrderedRegistry::new();
        registry.insert("b", 1);
        registry.insert("a", 2);
        assert_eq!(registry.insert("b", 3), Some(1));

        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(registry.into_vec(), vec![3, 2]);
    }

    #[test]
    fn test_insert_first_wins() {
        let mut registry = OrderedRegistry::new();
        assert!(registry.insert_first("DisplayString", "first"));
        assert!(!registry.insert_first("DisplayString", "second"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("DisplayString"), Some(&"first"));
    }

    #[test]
    fn test_collapse_skips_missing_keys() {
        let mut entries = HashMap::new();
        entries.insert("x".to_string(), 1);
        entries.insert("y".to_string(), 2);
        let order = vec!["y".to_string(), "missing".to_string(), "x".to_string()];

        assert_eq!(collapse(entries, &order), vec![2, 1]);
    }

    #[test]
    fn test_collapse_is_repeatable_with_order() {
        let registry: OrderedRegistry<u32> = (0..50).map(|i| (format!("k{i}"), i)).collect();
        let (entries, order) = registry.into_parts();

        let first = collapse(entries.clone(), &order);
        let second = collapse(entries, &order);
        assert_eq!(first, second);
        assert_eq!(first, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_collapse_without_order_is_unordered() {
        let mut entries = HashMap::new();
        for i in 0..10 {
            entries.insert(format!("k{i}"), i);
        }
        // Only membership is guaranteed without an order list.
        let mut values = collapse(entries, &[]);
        values.sort_unstable();
        assert_eq!(values, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let mut registry = OrderedRegistry::new();
        registry.insert("up", 1i64);
        registry.insert("down", 2);
        registry.insert("testing", 3);

        let json = serde_json::to_string(&registry).unwrap();
        assert_eq!(json, r#"{"up":1,"down":2,"testing":3}"#);

        let back: OrderedRegistry<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, registry);
    }
}
