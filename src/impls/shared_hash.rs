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

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::hash_key::HashKey;
use crate::hash_value::HashValue;
use crate::impls::ordered_hash::OrderedHash;
use crate::snapshot::Snapshot;
use crate::HashApi;
use crate::HashApiRO;

/// A shared handle on an [`OrderedHash`].
///
/// Clones of a handle alias the same storage, the way several references to
/// one hash object do. Each primitive borrows the storage only for its own
/// duration, so a callback running inside a traversal of one handle may mutate
/// the container through another handle. The traversal keeps walking the
/// snapshot it captured on entry.
pub struct SharedHash<K, V> {
    inner: Rc<RefCell<OrderedHash<K, V>>>,
}

impl<K, V> Clone for SharedHash<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Default for SharedHash<K, V> {
    fn default() -> Self {
        Self::from_hash(OrderedHash::new())
    }
}

impl<K, V> SharedHash<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_hash(hash: OrderedHash<K, V>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(hash)),
        }
    }

    /// Whether both handles refer to the same container.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<K, V> SharedHash<K, V>
where
    K: HashKey,
    V: HashValue,
{
    /// Copy out the current contents as an unshared hash.
    pub fn to_hash(&self) -> OrderedHash<K, V> {
        self.inner.borrow().duplicate()
    }
}

impl<K, V> HashApiRO<K, V> for SharedHash<K, V>
where
    K: HashKey,
    V: HashValue,
{
    fn size(&self) -> usize {
        self.inner.borrow().size()
    }

    fn entries(&self) -> Snapshot<K, V> {
        self.inner.borrow().entries()
    }

    fn has_key(&self, key: &K) -> bool {
        self.inner.borrow().has_key(key)
    }

    fn get(&self, key: &K) -> Option<V> {
        self.inner.borrow().get(key)
    }
}

impl<K, V> HashApi<K, V> for SharedHash<K, V>
where
    K: HashKey,
    V: HashValue,
{
    fn assign(&mut self, key: K, value: V) -> Option<V> {
        self.inner.borrow_mut().assign(key, value)
    }

    fn delete_by_key(&mut self, key: &K) -> Option<V> {
        self.inner.borrow_mut().delete_by_key(key)
    }

    /// The copy gets its own storage; it does not alias `self`.
    fn duplicate(&self) -> Self {
        Self::from_hash(self.to_hash())
    }
}

impl<K, V> PartialEq for SharedHash<K, V>
where
    K: HashKey,
    V: HashValue + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.inner.borrow() == *other.inner.borrow()
    }
}

impl<K, V> fmt::Debug for SharedHash<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(h) => fmt::Debug::fmt(&*h, f),
            Err(_) => write!(f, "{{..}}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_hash_clones_alias_storage() {
        let h = SharedHash::from_hash(OrderedHash::from([("a", 1)]));
        let mut alias = h.clone();

        alias.assign("b", 2);

        assert!(h.ptr_eq(&alias));
        assert_eq!(vec!["a", "b"], h.keys());
        assert_eq!(Some(2), h.get(&"b"));
    }

    #[test]
    fn test_shared_hash_duplicate_does_not_alias() {
        let mut h = SharedHash::from_hash(OrderedHash::from([("a", 1)]));
        let dup = h.duplicate();

        h.assign("a", 10);

        assert!(!h.ptr_eq(&dup));
        assert_eq!(Some(1), dup.get(&"a"));
        assert_eq!(Some(10), h.get(&"a"));
    }

    #[test]
    fn test_shared_hash_delete() {
        let mut h = SharedHash::from_hash(OrderedHash::from([("a", 1), ("b", 2)]));

        assert_eq!(Some(1), h.delete_by_key(&"a"));
        assert_eq!(1, h.size());
        assert!(!h.has_key(&"a"));
        assert_eq!(OrderedHash::from([("b", 2)]), h.to_hash());
    }

    #[test]
    fn test_shared_hash_debug() {
        let h = SharedHash::from_hash(OrderedHash::from([("a", 1)]));
        assert_eq!(r#"{"a": 1}"#, format!("{:?}", h));
    }
}
