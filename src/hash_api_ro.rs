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

//! Defines the read-only container interface.
//!
//! The [`HashApiRO`] trait is the set of primitives the traversal and
//! transformation operations consume from an associative container: its size,
//! membership, point lookup, and an ordered snapshot of its entries.

use crate::hash_key::HashKey;
use crate::hash_value::HashValue;
use crate::snapshot::Snapshot;

/// Provides read-only access to an insertion-ordered associative container.
///
/// Every method takes a consistent view of the container at the moment of the
/// call. The order of [`entries`](HashApiRO::entries) is the insertion order and
/// is significant: every traversal built on this trait follows it.
///
/// # Type Parameters
///
/// - `K`: The key type, which must implement [`HashKey`]
/// - `V`: The value type, which must implement [`HashValue`]
pub trait HashApiRO<K, V>
where
    K: HashKey,
    V: HashValue,
{
    /// Number of entries.
    fn size(&self) -> usize;

    /// Capture all entries in insertion order, keys and values in one pass.
    fn entries(&self) -> Snapshot<K, V>;

    /// Capture all keys in insertion order.
    fn keys(&self) -> Vec<K> {
        self.entries().into_keys()
    }

    /// Capture all values in insertion order.
    fn values(&self) -> Vec<V> {
        self.entries().into_values()
    }

    fn has_key(&self, key: &K) -> bool;

    /// Get a copy of the value stored under `key`, if any.
    fn get(&self, key: &K) -> Option<V>;
}
