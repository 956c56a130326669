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

//! Ordered, snapshot-consistent walks over a container's entries, keys or values.
//!
//! Every walk captures its snapshot once, when it starts, and then iterates
//! strictly over that capture. A callback that assigns or deletes entries of the
//! container being walked does not change the length or the contents of the
//! walk in progress.

use std::marker::PhantomData;
use std::ops::ControlFlow;
use std::vec;

use crate::enumerator::Enumerator;
use crate::enumerator::Operation;
use crate::hash_key::HashKey;
use crate::hash_value::HashValue;
use crate::HashApiRO;

/// The `each` operation: yields every `(key, value)` pair.
#[derive(Debug, Clone)]
pub struct Each<K, V>(PhantomData<fn() -> (K, V)>);

/// The `each_key` operation: yields every key.
#[derive(Debug, Clone)]
pub struct EachKey<K, V>(PhantomData<fn() -> (K, V)>);

/// The `each_value` operation: yields every value.
#[derive(Debug, Clone)]
pub struct EachValue<K, V>(PhantomData<fn() -> (K, V)>);

impl<K, V> Default for Each<K, V> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<K, V> Default for EachKey<K, V> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<K, V> Default for EachValue<K, V> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<'a, K, V, H> Operation<&'a H> for Each<K, V>
where
    K: HashKey,
    V: HashValue,
    H: HashApiRO<K, V>,
{
    type Item = (K, V);
    type Reply = ();
    type Output = &'a H;
    type Iter = vec::IntoIter<(K, V)>;

    fn name(&self) -> &'static str {
        "each"
    }

    fn start(&self, receiver: &&'a H) -> Self::Iter {
        receiver.entries().into_iter()
    }

    fn drive<B, F>(&self, receiver: &'a H, mut f: F) -> ControlFlow<B, &'a H>
    where F: FnMut(&(K, V)) -> ControlFlow<B> {
        for kv in receiver.entries().iter() {
            f(kv)?;
        }
        ControlFlow::Continue(receiver)
    }
}

impl<'a, K, V, H> Operation<&'a H> for EachKey<K, V>
where
    K: HashKey,
    V: HashValue,
    H: HashApiRO<K, V>,
{
    type Item = K;
    type Reply = ();
    type Output = &'a H;
    type Iter = vec::IntoIter<K>;

    fn name(&self) -> &'static str {
        "each_key"
    }

    fn start(&self, receiver: &&'a H) -> Self::Iter {
        receiver.keys().into_iter()
    }

    fn drive<B, F>(&self, receiver: &'a H, mut f: F) -> ControlFlow<B, &'a H>
    where F: FnMut(&K) -> ControlFlow<B> {
        for k in receiver.keys().iter() {
            f(k)?;
        }
        ControlFlow::Continue(receiver)
    }
}

impl<'a, K, V, H> Operation<&'a H> for EachValue<K, V>
where
    K: HashKey,
    V: HashValue,
    H: HashApiRO<K, V>,
{
    type Item = V;
    type Reply = ();
    type Output = &'a H;
    type Iter = vec::IntoIter<V>;

    fn name(&self) -> &'static str {
        "each_value"
    }

    fn start(&self, receiver: &&'a H) -> Self::Iter {
        receiver.values().into_iter()
    }

    fn drive<B, F>(&self, receiver: &'a H, mut f: F) -> ControlFlow<B, &'a H>
    where F: FnMut(&V) -> ControlFlow<B> {
        for v in receiver.values().iter() {
            f(v)?;
        }
        ControlFlow::Continue(receiver)
    }
}

/// Ordered walks over any [`HashApiRO`] container.
///
/// Each walk comes in three forms: without a callback it returns an
/// [`Enumerator`]; `*_with` runs a callback inline and returns the receiver;
/// `try_*_with` runs a callback that may stop the walk with
/// [`ControlFlow::Break`].
pub trait HashTraversal<K, V>: HashApiRO<K, V> + Sized
where
    K: HashKey,
    V: HashValue,
{
    fn each(&self) -> Enumerator<&Self, Each<K, V>> {
        Enumerator::new(self, Each::default())
    }

    /// Call `f` with every key and value, in insertion order.
    ///
    /// ```
    /// use iter_api::hash::HashTraversal;
    /// use iter_api::impls::ordered_hash::OrderedHash;
    ///
    /// let h = OrderedHash::from([("a", 100), ("b", 200)]);
    ///
    /// let mut seen = vec![];
    /// h.each_with(|k, v| seen.push(format!("{k} is {v}")));
    ///
    /// assert_eq!(vec!["a is 100", "b is 200"], seen);
    /// ```
    fn each_with<F>(&self, mut f: F) -> &Self
    where F: FnMut(&K, &V) {
        self.each().call(|(k, v)| f(k, v))
    }

    fn try_each_with<B, F>(&self, mut f: F) -> ControlFlow<B, &Self>
    where F: FnMut(&K, &V) -> ControlFlow<B> {
        self.each().try_call(|(k, v)| f(k, v))
    }

    /// Alias of [`each`](HashTraversal::each).
    fn each_pair(&self) -> Enumerator<&Self, Each<K, V>> {
        self.each()
    }

    /// Alias of [`each_with`](HashTraversal::each_with).
    fn each_pair_with<F>(&self, f: F) -> &Self
    where F: FnMut(&K, &V) {
        self.each_with(f)
    }

    fn each_key(&self) -> Enumerator<&Self, EachKey<K, V>> {
        Enumerator::new(self, EachKey::default())
    }

    fn each_key_with<F>(&self, mut f: F) -> &Self
    where F: FnMut(&K) {
        self.each_key().call(|k| f(k))
    }

    fn try_each_key_with<B, F>(&self, f: F) -> ControlFlow<B, &Self>
    where F: FnMut(&K) -> ControlFlow<B> {
        self.each_key().try_call(f)
    }

    fn each_value(&self) -> Enumerator<&Self, EachValue<K, V>> {
        Enumerator::new(self, EachValue::default())
    }

    fn each_value_with<F>(&self, mut f: F) -> &Self
    where F: FnMut(&V) {
        self.each_value().call(|v| f(v))
    }

    fn try_each_value_with<B, F>(&self, f: F) -> ControlFlow<B, &Self>
    where F: FnMut(&V) -> ControlFlow<B> {
        self.each_value().try_call(f)
    }
}

impl<K, V, H> HashTraversal<K, V> for H
where
    K: HashKey,
    V: HashValue,
    H: HashApiRO<K, V>,
{
}
