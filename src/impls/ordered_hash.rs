// Copyright 2021 Datafuse Labs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides a simple in-memory, insertion-ordered associative container.
//!
//! The [`OrderedHash`] struct implements [`HashApi`] by stamping every newly
//! inserted key with a monotonically increasing sequence number and keeping
//! entries in a [`BTreeMap`] ordered by that sequence. A [`HashMap`] from key to
//! sequence gives point access.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::de::MapAccess;
use serde::de::Visitor;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::hash_key::HashKey;
use crate::hash_value::HashValue;
use crate::snapshot::Snapshot;
use crate::HashApi;
use crate::HashApiRO;

/// An associative container that iterates in insertion order.
///
/// Updating an existing key keeps its position. Deleting a key and inserting it
/// again moves it to the end.
///
/// # Examples
///
/// ```
/// use iter_api::impls::ordered_hash::OrderedHash;
/// use iter_api::HashApi;
/// use iter_api::HashApiRO;
///
/// let mut h = OrderedHash::new();
/// h.assign("b", 2);
/// h.assign("a", 1);
/// h.assign("b", 20);
///
/// assert_eq!(vec!["b", "a"], h.keys());
/// assert_eq!(Some(20), h.get(&"b"));
/// ```
#[derive(Clone)]
pub struct OrderedHash<K, V> {
    /// The sequence number assigned to the last inserted key.
    last_seq: u64,

    /// Entries ordered by insertion sequence.
    by_seq: BTreeMap<u64, (K, V)>,

    /// Key to insertion sequence.
    index: HashMap<K, u64>,
}

impl<K, V> Default for OrderedHash<K, V> {
    fn default() -> Self {
        Self {
            last_seq: 0,
            by_seq: BTreeMap::new(),
            index: HashMap::new(),
        }
    }
}

impl<K, V> OrderedHash<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_seq.is_empty()
    }

    /// Borrowing iteration in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.by_seq.values().map(|(k, v)| (k, v))
    }
}

impl<K, V> HashApiRO<K, V> for OrderedHash<K, V>
where
    K: HashKey,
    V: HashValue,
{
    fn size(&self) -> usize {
        self.len()
    }

    fn entries(&self) -> Snapshot<K, V> {
        Snapshot::new(self.by_seq.values().cloned().collect())
    }

    fn has_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn get(&self, key: &K) -> Option<V> {
        let seq = self.index.get(key)?;
        self.by_seq.get(seq).map(|(_, v)| v.clone())
    }
}

impl<K, V> HashApi<K, V> for OrderedHash<K, V>
where
    K: HashKey,
    V: HashValue,
{
    fn assign(&mut self, key: K, value: V) -> Option<V> {
        if let Some(seq) = self.index.get(&key) {
            if let Some((_, v)) = self.by_seq.get_mut(seq) {
                return Some(std::mem::replace(v, value));
            }
        }

        self.last_seq += 1;
        let seq = self.last_seq;
        self.index.insert(key.clone(), seq);
        self.by_seq.insert(seq, (key, value));
        None
    }

    fn delete_by_key(&mut self, key: &K) -> Option<V> {
        let seq = self.index.remove(key)?;
        self.by_seq.remove(&seq).map(|(_, v)| v)
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }
}

impl<K, V> PartialEq for OrderedHash<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    /// Two hashes are equal when they hold the same keys mapped to equal
    /// values, regardless of insertion order.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.by_seq.values().all(|(k, v)| {
            other
                .index
                .get(k)
                .and_then(|seq| other.by_seq.get(seq))
                .is_some_and(|(_, ov)| v == ov)
        })
    }
}

impl<K, V> Eq for OrderedHash<K, V>
where
    K: Eq + Hash,
    V: Eq,
{
}

impl<K, V> fmt::Debug for OrderedHash<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedHash<K, V>
where
    K: HashKey,
    V: HashValue,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut h = Self::new();
        h.extend(iter);
        h
    }
}

impl<K, V> Extend<(K, V)> for OrderedHash<K, V>
where
    K: HashKey,
    V: HashValue,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.assign(k, v);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for OrderedHash<K, V>
where
    K: HashKey,
    V: HashValue,
{
    fn from(entries: [(K, V); N]) -> Self {
        Self::from_iter(entries)
    }
}

impl<K, V> Serialize for OrderedHash<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        serializer.collect_map(self.iter())
    }
}

impl<'de, K, V> Deserialize<'de> for OrderedHash<K, V>
where
    K: HashKey + Deserialize<'de>,
    V: HashValue + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
        deserializer.deserialize_map(OrderedHashVisitor(PhantomData))
    }
}

/// Collects map entries in document order.
struct OrderedHashVisitor<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for OrderedHashVisitor<K, V>
where
    K: HashKey + Deserialize<'de>,
    V: HashValue + Deserialize<'de>,
{
    type Value = OrderedHash<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where A: MapAccess<'de> {
        let mut h = OrderedHash::new();
        while let Some((k, v)) = access.next_entry()? {
            h.assign(k, v);
        }
        Ok(h)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ordered_hash_insertion_order() {
        let h = OrderedHash::from([("foo", 0), ("bar", 1), ("baz", 2)]);

        assert_eq!(3, h.size());
        assert_eq!(vec!["foo", "bar", "baz"], h.keys());
        assert_eq!(vec![0, 1, 2], h.values());
        assert_eq!(
            vec![("foo", 0), ("bar", 1), ("baz", 2)],
            h.entries().into_iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_ordered_hash_update_keeps_position() {
        let mut h = OrderedHash::from([("a", 1), ("b", 2)]);

        assert_eq!(Some(1), h.assign("a", 10));
        assert_eq!(
            vec![("a", 10), ("b", 2)],
            h.entries().into_iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_ordered_hash_delete_then_reinsert_moves_to_end() {
        let mut h = OrderedHash::from([("a", 1), ("b", 2)]);

        assert_eq!(Some(1), h.delete_by_key(&"a"));
        assert_eq!(None, h.delete_by_key(&"a"));
        assert!(!h.has_key(&"a"));

        assert_eq!(None, h.assign("a", 3));
        assert_eq!(vec!["b", "a"], h.keys());
        assert_eq!(Some(3), h.get(&"a"));
    }

    #[test]
    fn test_ordered_hash_duplicate_is_independent() {
        let mut h = OrderedHash::from([("a", 1)]);
        let mut dup = h.duplicate();

        dup.assign("b", 2);
        h.assign("a", 100);

        assert_eq!(OrderedHash::from([("a", 100)]), h);
        assert_eq!(OrderedHash::from([("a", 1), ("b", 2)]), dup);
    }

    #[test]
    fn test_ordered_hash_eq_ignores_order() {
        let h1 = OrderedHash::from([("a", 1), ("b", 2)]);
        let h2 = OrderedHash::from([("b", 2), ("a", 1)]);
        let h3 = OrderedHash::from([("a", 1), ("b", 3)]);

        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
        assert_ne!(h1, OrderedHash::from([("a", 1)]));
    }

    #[test]
    fn test_ordered_hash_debug() {
        let h = OrderedHash::from([("b", 2), ("a", 1)]);
        assert_eq!(r#"{"b": 2, "a": 1}"#, format!("{:?}", h));
    }

    #[test]
    fn test_ordered_hash_serde() -> anyhow::Result<()> {
        let h = OrderedHash::from([("z".to_string(), 1), ("a".to_string(), 2)]);

        let s = serde_json::to_string(&h)?;
        assert_eq!(r#"{"z":1,"a":2}"#, s);

        let got: OrderedHash<String, i64> = serde_json::from_str(r#"{"m":1,"b":2,"x":3}"#)?;
        assert_eq!(vec!["m", "b", "x"], got.keys());

        Ok(())
    }
}
