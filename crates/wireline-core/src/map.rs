//! # WireMap — Hash-Bucketed Map Over the HashKey Contract
//!
//! An associative container keyed by anything implementing [`HashKey`]. A
//! lookup selects a bucket by the key's [`HashCode`], then equality-scans
//! the bucket's entries, so key types control both halves of the contract
//! and hash collisions degrade to a linear scan instead of a wrong answer.
//!
//! ## Ordering Invariant
//!
//! Iteration order — and therefore JSON output order — is **unspecified**.
//! It follows the bucket table, not insertion order, and two maps built
//! from the same entries in different orders may serialize differently.
//! Consumers must compare maps by membership, never by encoded text.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::WireError;
use crate::hash::{HashCode, HashKey};
use crate::json::{FromJson, ToJson};

/// A map from `K` to `V` using the pluggable equality/hash contract.
///
/// `Clone` produces a shallow structural copy: the container structure is
/// duplicated, entries are cloned with their own `Clone` impls.
#[derive(Debug, Clone)]
pub struct WireMap<K, V> {
    buckets: HashMap<HashCode, Vec<(K, V)>>,
    len: usize,
}

impl<K: HashKey, V> WireMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        WireMap {
            buckets: HashMap::new(),
            len: 0,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Looks up a key. A missing key is `None`, never an error.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.buckets
            .get(&key.hash_code())?
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Inserts an entry, overwriting the value if the key already exists.
    ///
    /// Deliberately returns nothing: the wire contract exposes no
    /// insert-versus-update signal.
    pub fn insert(&mut self, key: K, value: V) {
        let bucket = self.buckets.entry(key.hash_code()).or_default();
        if let Some(entry) = bucket.iter_mut().find(|(candidate, _)| candidate == &key) {
            entry.1 = value;
        } else {
            bucket.push((key, value));
            self.len += 1;
        }
    }

    /// Removes a key. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &K) {
        let code = key.hash_code();
        if let Some(bucket) = self.buckets.get_mut(&code) {
            if let Some(position) = bucket.iter().position(|(candidate, _)| candidate == key) {
                bucket.remove(position);
                self.len -= 1;
                if bucket.is_empty() {
                    self.buckets.remove(&code);
                }
            }
        }
    }

    /// Iterates entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .values()
            .flatten()
            .map(|(key, value)| (key, value))
    }
}

impl<K: HashKey, V> Default for WireMap<K, V> {
    fn default() -> Self {
        WireMap::new()
    }
}

impl<K: HashKey, V> FromIterator<(K, V)> for WireMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(entries: I) -> Self {
        let mut map = WireMap::new();
        for (key, value) in entries {
            map.insert(key, value);
        }
        map
    }
}

impl<K: HashKey + ToJson, V: ToJson> ToJson for WireMap<K, V> {
    fn to_json(&self) -> Value {
        Value::Array(
            self.iter()
                .map(|(key, value)| Value::Array(vec![key.to_json(), value.to_json()]))
                .collect(),
        )
    }
}

impl<K: HashKey + FromJson, V: FromJson> FromJson for WireMap<K, V> {
    fn from_json(value: &Value) -> Result<Self, WireError> {
        let entries = value
            .as_array()
            .ok_or_else(|| WireError::mismatch("an array of pairs", value))?;
        let mut map = WireMap::new();
        for entry in entries {
            let pair = entry
                .as_array()
                .ok_or_else(|| WireError::mismatch("a [key, value] pair", entry))?;
            if pair.len() != 2 {
                return Err(WireError::MalformedPair(pair.len()));
            }
            map.insert(K::from_json(&pair[0])?, V::from_json(&pair[1])?);
        }
        Ok(map)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap as StdMap;

    proptest! {
        #[test]
        fn round_trip_preserves_every_lookup(entries in proptest::collection::hash_map(any::<i32>(), any::<i32>(), 0..32)) {
            let map: WireMap<i32, i32> = entries.clone().into_iter().collect();
            let decoded = WireMap::<i32, i32>::from_json(&map.to_json()).unwrap();
            prop_assert_eq!(decoded.len(), entries.len());
            for (key, value) in &entries {
                prop_assert_eq!(decoded.get(key), Some(value));
            }
        }

        #[test]
        fn matches_a_standard_map_under_mixed_operations(
            operations in proptest::collection::vec((any::<u8>(), 0i32..16, any::<i32>()), 0..64)
        ) {
            let mut map: WireMap<i32, i32> = WireMap::new();
            let mut oracle: StdMap<i32, i32> = StdMap::new();
            for (op, key, value) in operations {
                if op % 3 == 0 {
                    map.remove(&key);
                    oracle.remove(&key);
                } else {
                    map.insert(key, value);
                    oracle.insert(key, value);
                }
            }
            prop_assert_eq!(map.len(), oracle.len());
            for (key, value) in &oracle {
                prop_assert_eq!(map.get(key), Some(value));
            }
        }
    }
}
