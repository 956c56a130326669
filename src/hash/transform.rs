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

//! Filtering, merging and deletion built on snapshot traversal.
//!
//! The copying filters, `select` and `reject`, walk a snapshot and build a new
//! container. The in-place filters, `select!` and `reject!`, run in two phases:
//! the predicate is evaluated over the whole snapshot first, collecting the keys
//! to delete, and only then are the keys deleted. Nothing is deleted while the
//! predicate is still being called.

use std::marker::PhantomData;
use std::ops::ControlFlow;
use std::vec;

use log::debug;

use crate::enumerator::Enumerator;
use crate::enumerator::Operation;
use crate::errors::MergeError;
use crate::hash::merge_source::MergeSource;
use crate::hash_key::HashKey;
use crate::hash_value::HashValue;
use crate::HashApi;

/// The `select` operation: copy the entries the predicate accepts.
#[derive(Debug, Clone)]
pub struct Select<K, V>(PhantomData<fn() -> (K, V)>);

/// The `reject` operation: copy the entries the predicate refuses.
#[derive(Debug, Clone)]
pub struct Reject<K, V>(PhantomData<fn() -> (K, V)>);

/// The `select!` operation: delete the entries the predicate refuses.
#[derive(Debug, Clone)]
pub struct SelectInPlace<K, V>(PhantomData<fn() -> (K, V)>);

/// The `reject!` operation: delete the entries the predicate accepts.
#[derive(Debug, Clone)]
pub struct RejectInPlace<K, V>(PhantomData<fn() -> (K, V)>);

macro_rules! impl_default {
    ($($op:ident),*) => {
        $(
            impl<K, V> Default for $op<K, V> {
                fn default() -> Self {
                    Self(PhantomData)
                }
            }
        )*
    };
}

impl_default!(Select, Reject, SelectInPlace, RejectInPlace);

/// Build a new container from the entries for which the predicate returns `keep_when`.
fn filter_copy<K, V, H, B, F>(receiver: &H, keep_when: bool, mut f: F) -> ControlFlow<B, H>
where
    K: HashKey,
    V: HashValue,
    H: HashApi<K, V>,
    F: FnMut(&(K, V)) -> ControlFlow<B, bool>,
{
    let mut out = H::default();
    for kv in receiver.entries() {
        if f(&kv)? == keep_when {
            let (k, v) = kv;
            out.assign(k, v);
        }
    }
    ControlFlow::Continue(out)
}

/// Delete the entries for which the predicate returns `delete_when`.
///
/// Returns `None` if no entry matched. A break from the predicate leaves the
/// receiver untouched.
fn filter_in_place<'a, K, V, H, B, F>(
    name: &'static str,
    receiver: &'a mut H,
    delete_when: bool,
    mut f: F,
) -> ControlFlow<B, Option<&'a mut H>>
where
    K: HashKey,
    V: HashValue,
    H: HashApi<K, V>,
    F: FnMut(&(K, V)) -> ControlFlow<B, bool>,
{
    let mut doomed = Vec::new();
    for kv in receiver.entries() {
        if f(&kv)? == delete_when {
            doomed.push(kv.0);
        }
    }

    if doomed.is_empty() {
        debug!("{}: no entry matched, nothing deleted", name);
        return ControlFlow::Continue(None);
    }

    for k in doomed.iter() {
        receiver.delete_by_key(k);
    }
    debug!("{}: deleted {} entries", name, doomed.len());

    ControlFlow::Continue(Some(receiver))
}

macro_rules! impl_copy_filter {
    ($op:ident, $name:expr, $keep_when:expr) => {
        impl<'a, K, V, H> Operation<&'a H> for $op<K, V>
        where
            K: HashKey,
            V: HashValue,
            H: HashApi<K, V>,
        {
            type Item = (K, V);
            type Reply = bool;
            type Output = H;
            type Iter = vec::IntoIter<(K, V)>;

            fn name(&self) -> &'static str {
                $name
            }

            fn start(&self, receiver: &&'a H) -> Self::Iter {
                receiver.entries().into_iter()
            }

            fn drive<B, F>(&self, receiver: &'a H, f: F) -> ControlFlow<B, H>
            where F: FnMut(&(K, V)) -> ControlFlow<B, bool> {
                filter_copy(receiver, $keep_when, f)
            }
        }
    };
}

impl_copy_filter!(Select, "select", true);
impl_copy_filter!(Reject, "reject", false);

macro_rules! impl_in_place_filter {
    ($op:ident, $name:expr, $delete_when:expr) => {
        impl<'a, K, V, H> Operation<&'a mut H> for $op<K, V>
        where
            K: HashKey,
            V: HashValue,
            H: HashApi<K, V>,
        {
            type Item = (K, V);
            type Reply = bool;
            type Output = Option<&'a mut H>;
            type Iter = vec::IntoIter<(K, V)>;

            fn name(&self) -> &'static str {
                $name
            }

            /// Pulling yields the entries the predicate would see; it never deletes.
            fn start(&self, receiver: &&'a mut H) -> Self::Iter {
                receiver.entries().into_iter()
            }

            fn drive<B, F>(&self, receiver: &'a mut H, f: F) -> ControlFlow<B, Option<&'a mut H>>
            where F: FnMut(&(K, V)) -> ControlFlow<B, bool> {
                filter_in_place($name, receiver, $delete_when, f)
            }
        }
    };
}

impl_in_place_filter!(SelectInPlace, "select!", false);
impl_in_place_filter!(RejectInPlace, "reject!", true);

/// Merge `others` into `acc`, in argument order.
///
/// With a resolver, a key already present in `acc`, whether it came from the
/// receiver or from an earlier argument, gets
/// `resolver(key, current, incoming)`. A key seen for the first time is
/// inserted as is.
fn merge_into<K, V, H, F>(
    mut acc: H,
    others: &[&dyn MergeSource<K, V>],
    mut resolver: Option<F>,
) -> Result<H, MergeError>
where
    K: HashKey,
    V: HashValue,
    H: HashApi<K, V>,
    F: FnMut(&K, &V, &V) -> V,
{
    for (i, other) in others.iter().enumerate() {
        let Some(entries) = other.merge_entries() else {
            debug!("merge: argument {} is {}, not a Hash", i + 1, other.kind());
            return Err(MergeError::HashRequired {
                position: i + 1,
                given: other.kind(),
            });
        };

        for (k, incoming) in entries {
            let v = match (resolver.as_mut(), acc.get(&k)) {
                (Some(resolve), Some(current)) => resolve(&k, &current, &incoming),
                _ => incoming,
            };
            acc.assign(k, v);
        }
    }

    Ok(acc)
}

/// Deletion, merging and filtering over any [`HashApi`] container.
pub trait HashTransform<K, V>: HashApi<K, V>
where
    K: HashKey,
    V: HashValue,
{
    /// Remove `key` and return its value, or `None` if it is absent.
    fn delete(&mut self, key: &K) -> Option<V> {
        self.delete_by_key(key)
    }

    /// Remove `key` and return its value; if it is absent return `fallback(key)`.
    ///
    /// `fallback` is called only for a missing key.
    fn delete_or_else<F>(&mut self, key: &K, fallback: F) -> V
    where F: FnOnce(&K) -> V {
        match self.delete_by_key(key) {
            Some(v) => v,
            None => fallback(key),
        }
    }

    /// Return a copy of `self` with the entries of every argument merged in,
    /// later arguments overwriting earlier values.
    ///
    /// Fails with [`MergeError::HashRequired`] if an argument is not an
    /// associative container. `self` and the arguments are never modified.
    fn merge(&self, others: &[&dyn MergeSource<K, V>]) -> Result<Self, MergeError> {
        merge_into(self.duplicate(), others, None::<fn(&K, &V, &V) -> V>)
    }

    /// Like [`merge`](HashTransform::merge), but a colliding key gets
    /// `resolver(key, current_value, incoming_value)`.
    ///
    /// ```
    /// use iter_api::hash::HashTransform;
    /// use iter_api::impls::ordered_hash::OrderedHash;
    ///
    /// let h = OrderedHash::from([("foo", 0), ("bar", 1), ("baz", 2)]);
    /// let h1 = OrderedHash::from([("bat", 3), ("bar", 4)]);
    /// let h2 = OrderedHash::from([("bam", 5), ("bat", 6)]);
    ///
    /// let h3 = h.merge_with(&[&h1, &h2], |_k, old, new| old + new).unwrap();
    ///
    /// let want = OrderedHash::from([("foo", 0), ("bar", 5), ("baz", 2), ("bat", 9), ("bam", 5)]);
    /// assert_eq!(want, h3);
    /// ```
    fn merge_with<F>(&self, others: &[&dyn MergeSource<K, V>], resolver: F) -> Result<Self, MergeError>
    where F: FnMut(&K, &V, &V) -> V {
        merge_into(self.duplicate(), others, Some(resolver))
    }

    fn select(&self) -> Enumerator<&Self, Select<K, V>> {
        Enumerator::new(self, Select::default())
    }

    /// Return a new container with the entries for which `f` returns `true`.
    fn select_with<F>(&self, mut f: F) -> Self
    where F: FnMut(&K, &V) -> bool {
        self.select().call(|(k, v)| f(k, v))
    }

    fn try_select_with<B, F>(&self, mut f: F) -> ControlFlow<B, Self>
    where F: FnMut(&K, &V) -> ControlFlow<B, bool> {
        self.select().try_call(|(k, v)| f(k, v))
    }

    fn reject(&self) -> Enumerator<&Self, Reject<K, V>> {
        Enumerator::new(self, Reject::default())
    }

    /// Return a new container with the entries for which `f` returns `false`.
    fn reject_with<F>(&self, mut f: F) -> Self
    where F: FnMut(&K, &V) -> bool {
        self.reject().call(|(k, v)| f(k, v))
    }

    fn try_reject_with<B, F>(&self, mut f: F) -> ControlFlow<B, Self>
    where F: FnMut(&K, &V) -> ControlFlow<B, bool> {
        self.reject().try_call(|(k, v)| f(k, v))
    }

    fn select_in_place(&mut self) -> Enumerator<&mut Self, SelectInPlace<K, V>> {
        Enumerator::new(self, SelectInPlace::default())
    }

    /// Keep only the entries for which `f` returns `true`.
    ///
    /// Returns `Some(self)` if any entry was deleted, `None` if nothing changed.
    fn select_in_place_with<F>(&mut self, mut f: F) -> Option<&mut Self>
    where F: FnMut(&K, &V) -> bool {
        self.select_in_place().call(|(k, v)| f(k, v))
    }

    fn try_select_in_place_with<B, F>(&mut self, mut f: F) -> ControlFlow<B, Option<&mut Self>>
    where F: FnMut(&K, &V) -> ControlFlow<B, bool> {
        self.select_in_place().try_call(|(k, v)| f(k, v))
    }

    fn reject_in_place(&mut self) -> Enumerator<&mut Self, RejectInPlace<K, V>> {
        Enumerator::new(self, RejectInPlace::default())
    }

    /// Delete the entries for which `f` returns `true`.
    ///
    /// Returns `Some(self)` if any entry was deleted, `None` if nothing changed.
    fn reject_in_place_with<F>(&mut self, mut f: F) -> Option<&mut Self>
    where F: FnMut(&K, &V) -> bool {
        self.reject_in_place().call(|(k, v)| f(k, v))
    }

    fn try_reject_in_place_with<B, F>(&mut self, mut f: F) -> ControlFlow<B, Option<&mut Self>>
    where F: FnMut(&K, &V) -> ControlFlow<B, bool> {
        self.reject_in_place().try_call(|(k, v)| f(k, v))
    }
}

impl<K, V, H> HashTransform<K, V> for H
where
    K: HashKey,
    V: HashValue,
    H: HashApi<K, V>,
{
}
