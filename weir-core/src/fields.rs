use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A value accumulated for one transaction field.
///
/// This is the closed set of shapes a merge strategy may produce. Strategies
/// never synthesize anything outside of it: scalars for single-valued tags,
/// `List` for tags that repeat within a transaction, `Map` for tags that
/// carry key/value payloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Bool(bool),
    List(Vec<FieldValue>),
    Map(FieldMap),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&FieldMap> {
        match self {
            FieldValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// A string-keyed map that keeps its entries in insertion order.
///
/// Repeated tags accumulate here, and the order values arrived in is part of
/// the output contract, so a sorted map will not do. Transactions hold a
/// handful of keys each; linear lookup is fine at that size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, FieldValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(slot) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// The nested map at `key`, created empty if absent.
    ///
    /// A non-map value already stored under `key` is replaced; strategies
    /// that nest never share a key with strategies that store scalars.
    pub fn map_entry(&mut self, key: &str) -> &mut FieldMap {
        if !matches!(self.get(key), Some(FieldValue::Map(_))) {
            self.insert(key.to_owned(), FieldValue::Map(FieldMap::new()));
        }
        match self.get_mut(key) {
            Some(FieldValue::Map(map)) => map,
            _ => unreachable!("map entry was just inserted"),
        }
    }

    /// The list at `key`, created empty if absent.
    pub fn list_entry(&mut self, key: &str) -> &mut Vec<FieldValue> {
        if !matches!(self.get(key), Some(FieldValue::List(_))) {
            self.insert(key.to_owned(), FieldValue::List(Vec::new()));
        }
        match self.get_mut(key) {
            Some(FieldValue::List(items)) => items,
            _ => unreachable!("list entry was just inserted"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for FieldMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
