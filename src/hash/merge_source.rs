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

//! Arguments accepted by `merge`.
//!
//! `merge` takes a heterogeneous list of sources and checks at run time that
//! every one of them is an associative container, so a list assembled from
//! dynamically typed data fails with a positional error instead of merging
//! something that is not a hash.

use crate::hash_key::HashKey;
use crate::hash_value::HashValue;
use crate::impls::ordered_hash::OrderedHash;
use crate::impls::shared_hash::SharedHash;
use crate::num::Num;
use crate::snapshot::Snapshot;
use crate::HashApiRO;

/// A value passed as a `merge` argument.
pub trait MergeSource<K, V> {
    /// Name of the runtime kind of this value, used in error messages.
    fn kind(&self) -> &'static str;

    /// An ordered snapshot of the entries, or `None` if this value is not an
    /// associative container.
    fn merge_entries(&self) -> Option<Snapshot<K, V>>;
}

impl<K, V> MergeSource<K, V> for OrderedHash<K, V>
where
    K: HashKey,
    V: HashValue,
{
    fn kind(&self) -> &'static str {
        "Hash"
    }

    fn merge_entries(&self) -> Option<Snapshot<K, V>> {
        Some(self.entries())
    }
}

impl<K, V> MergeSource<K, V> for SharedHash<K, V>
where
    K: HashKey,
    V: HashValue,
{
    fn kind(&self) -> &'static str {
        "Hash"
    }

    fn merge_entries(&self) -> Option<Snapshot<K, V>> {
        Some(self.entries())
    }
}

/// An array of pairs is not a hash, even though it holds the same data.
impl<K, V> MergeSource<K, V> for Vec<(K, V)> {
    fn kind(&self) -> &'static str {
        "Array"
    }

    fn merge_entries(&self) -> Option<Snapshot<K, V>> {
        None
    }
}

macro_rules! not_a_hash {
    ($t:ty, $kind:expr) => {
        impl<K, V> MergeSource<K, V> for $t {
            fn kind(&self) -> &'static str {
                $kind
            }

            fn merge_entries(&self) -> Option<Snapshot<K, V>> {
                None
            }
        }
    };
}

not_a_hash!((), "nil");
not_a_hash!(bool, "Boolean");
not_a_hash!(i64, "Integer");
not_a_hash!(f64, "Float");
not_a_hash!(String, "String");
not_a_hash!(&str, "String");

impl<K, V> MergeSource<K, V> for Num {
    fn kind(&self) -> &'static str {
        match self {
            Num::Int(_) => "Integer",
            Num::Float(_) => "Float",
        }
    }

    fn merge_entries(&self) -> Option<Snapshot<K, V>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_source_kinds() {
        let h = OrderedHash::from([("a", 1)]);
        let pairs = vec![("a", 1)];

        let sources: [&dyn MergeSource<&str, i32>; 8] =
            [&h, &pairs, &(), &true, &3i64, &1.5f64, &Num::Int(1), &"x"];
        let kinds = sources.iter().map(|s| s.kind()).collect::<Vec<_>>();

        assert_eq!(
            vec!["Hash", "Array", "nil", "Boolean", "Integer", "Float", "Integer", "String"],
            kinds
        );
        assert!(sources[0].merge_entries().is_some());
        assert!(sources[1..].iter().all(|s| s.merge_entries().is_none()));
    }
}
