//! # WireSet — Hash-Bucketed Membership Over the HashKey Contract
//!
//! The membership-only counterpart of [`WireMap`](crate::map::WireMap):
//! same bucket-then-equality-scan lookup, same overwrite/no-op mutation
//! semantics, same unspecified iteration order. The JSON form is a bare
//! sequence of encoded keys.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::WireError;
use crate::hash::{HashCode, HashKey};
use crate::json::{FromJson, ToJson};

/// A set of keys using the pluggable equality/hash contract.
#[derive(Debug, Clone)]
pub struct WireSet<K> {
    buckets: HashMap<HashCode, Vec<K>>,
    len: usize,
}

impl<K: HashKey> WireSet<K> {
    /// Creates an empty set.
    pub fn new() -> Self {
        WireSet {
            buckets: HashMap::new(),
            len: 0,
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set holds no members.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Tests membership. A missing key is `false`, never an error.
    pub fn contains(&self, key: &K) -> bool {
        self.buckets
            .get(&key.hash_code())
            .is_some_and(|bucket| bucket.iter().any(|candidate| candidate == key))
    }

    /// Adds a key. Adding an existing key is a no-op.
    pub fn insert(&mut self, key: K) {
        let bucket = self.buckets.entry(key.hash_code()).or_default();
        if !bucket.iter().any(|candidate| candidate == &key) {
            bucket.push(key);
            self.len += 1;
        }
    }

    /// Removes a key. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &K) {
        let code = key.hash_code();
        if let Some(bucket) = self.buckets.get_mut(&code) {
            if let Some(position) = bucket.iter().position(|candidate| candidate == key) {
                bucket.remove(position);
                self.len -= 1;
                if bucket.is_empty() {
                    self.buckets.remove(&code);
                }
            }
        }
    }

    /// Iterates members in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.buckets.values().flatten()
    }
}

impl<K: HashKey> Default for WireSet<K> {
    fn default() -> Self {
        WireSet::new()
    }
}

impl<K: HashKey> FromIterator<K> for WireSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut set = WireSet::new();
        for key in keys {
            set.insert(key);
        }
        set
    }
}

impl<K: HashKey + ToJson> ToJson for WireSet<K> {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl<K: HashKey + FromJson> FromJson for WireSet<K> {
    fn from_json(value: &Value) -> Result<Self, WireError> {
        let keys = value
            .as_array()
            .ok_or_else(|| WireError::mismatch("an array of keys", value))?;
        let mut set = WireSet::new();
        for key in keys {
            set.insert(K::from_json(key)?);
        }
        Ok(set)
    }
}
