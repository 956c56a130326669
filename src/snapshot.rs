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

//! An immutable, ordered capture of a container's entries.
//!
//! A traversal takes exactly one [`Snapshot`] at entry and walks it to the end.
//! Whatever the callback does to the live container afterwards, the walk sees
//! the same length and the same `(key, value)` pairs.

use std::slice;
use std::vec;

use log::warn;

/// Capturing more entries than this is logged as a warning.
pub const BIG_SNAPSHOT_WARN_LEN: usize = 1000;

/// Ordered `(key, value)` pairs captured atomically from a container.
///
/// Keys and values are captured together, so a pair is never assembled from
/// two separate reads of the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for Snapshot<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K, V> Snapshot<K, V> {
    pub fn new(entries: Vec<(K, V)>) -> Self {
        if entries.len() > BIG_SNAPSHOT_WARN_LEN {
            warn!(
                "Snapshot::new() captures big container of len={}",
                entries.len()
            );
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, (K, V)> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[(K, V)] {
        &self.entries
    }

    pub fn into_keys(self) -> Vec<K> {
        self.entries.into_iter().map(|(k, _)| k).collect()
    }

    pub fn into_values(self) -> Vec<V> {
        self.entries.into_iter().map(|(_, v)| v).collect()
    }
}

impl<K, V> IntoIterator for Snapshot<K, V> {
    type Item = (K, V);
    type IntoIter = vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Snapshot<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
