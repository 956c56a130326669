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

//! Defines the read-write container interface.
//!
//! The [`HashApi`] trait extends [`HashApiRO`] with the mutating primitives
//! needed by the transformation operations: assignment, deletion by key and
//! shallow duplication.

use crate::hash_api_ro::HashApiRO;
use crate::hash_key::HashKey;
use crate::hash_value::HashValue;

/// Provides read-write access to an insertion-ordered associative container.
///
/// `Default` must produce an empty container; copying operations such as
/// `select` build their result from it.
pub trait HashApi<K, V>: HashApiRO<K, V> + Default
where
    K: HashKey,
    V: HashValue,
{
    /// Set `key` to `value` and return the previous value.
    ///
    /// An existing key keeps its position in the insertion order.
    /// A new key is appended at the end.
    fn assign(&mut self, key: K, value: V) -> Option<V>;

    /// Remove `key` and return its value, or `None` if it is absent.
    fn delete_by_key(&mut self, key: &K) -> Option<V>;

    /// Produce an independent shallow copy: same entries in the same order,
    /// but later mutation of either container is not seen by the other.
    fn duplicate(&self) -> Self;
}
