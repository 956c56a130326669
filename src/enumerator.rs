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

//! The lazy iteration handle returned by an operation called without a callback.
//!
//! An [`Enumerator`] records a receiver and an [`Operation`] value. The
//! operation value is the operation identifier together with the arguments the
//! caller passed, e.g. `Upto { limit }`. Building an enumerator performs no
//! iteration. It can later be consumed in two ways:
//!
//! - Push: [`Enumerator::call`] or [`Enumerator::try_call`] runs the operation
//!   with a callback supplied now, exactly as if it had been given in the first
//!   place.
//! - Pull: [`Enumerator::iter`] starts a fresh traversal and returns a plain
//!   [`Iterator`], so the handle composes with any sequence-consuming code.
//!   Every call starts over from the beginning.

use std::fmt;
use std::ops::ControlFlow;

use futures::stream::BoxStream;
use futures_util::StreamExt;

use crate::flow::into_continue;

/// An iteration-capable operation bound with its captured arguments.
///
/// `R` is the receiver type the operation runs on, e.g. `&OrderedHash<K, V>`,
/// `&mut OrderedHash<K, V>` or `i64`.
pub trait Operation<R> {
    /// The element produced per step, passed to the callback by reference
    /// and yielded by value from the pull iterator.
    type Item;

    /// What the callback returns per element: `()` for plain walks, `bool`
    /// for predicates.
    type Reply;

    /// What the operation returns after a complete traversal.
    type Output;

    /// A fresh, self-contained traversal.
    type Iter: Iterator<Item = Self::Item>;

    /// The operation identifier, such as `each` or `select!`.
    fn name(&self) -> &'static str;

    /// Start a new pull-based traversal over `receiver`.
    fn start(&self, receiver: &R) -> Self::Iter;

    /// Run the operation, invoking `f` once per element in traversal order.
    ///
    /// A `Break` returned by `f` stops the traversal and is returned as is.
    fn drive<B, F>(&self, receiver: R, f: F) -> ControlFlow<B, Self::Output>
    where F: FnMut(&Self::Item) -> ControlFlow<B, Self::Reply>;
}

/// A restartable, lazily consumed handle on a deferred operation.
#[derive(Debug, Clone)]
pub struct Enumerator<R, O> {
    receiver: R,
    operation: O,
}

impl<R, O> Enumerator<R, O>
where O: Operation<R>
{
    pub fn new(receiver: R, operation: O) -> Self {
        Self {
            receiver,
            operation,
        }
    }

    pub fn name(&self) -> &'static str {
        self.operation.name()
    }

    pub fn receiver(&self) -> &R {
        &self.receiver
    }

    pub fn operation(&self) -> &O {
        &self.operation
    }

    /// Start a new traversal. Each call begins from the first element.
    pub fn iter(&self) -> O::Iter {
        self.operation.start(&self.receiver)
    }

    /// Run the deferred operation with a callback supplied now.
    pub fn call<F>(self, mut f: F) -> O::Output
    where F: FnMut(&O::Item) -> O::Reply {
        into_continue(self.try_call(|item| ControlFlow::Continue(f(item))))
    }

    /// Run the deferred operation with a callback that may stop it early.
    pub fn try_call<B, F>(self, f: F) -> ControlFlow<B, O::Output>
    where F: FnMut(&O::Item) -> ControlFlow<B, O::Reply> {
        self.operation.drive(self.receiver, f)
    }

    /// Adapt a fresh traversal into a stream for async consumers.
    pub fn into_stream(self) -> BoxStream<'static, O::Item>
    where
        O::Iter: Send + 'static,
        O::Item: Send + 'static,
    {
        futures::stream::iter(self.iter()).boxed()
    }
}

impl<R, O> IntoIterator for Enumerator<R, O>
where O: Operation<R>
{
    type Item = O::Item;
    type IntoIter = O::Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'e, R, O> IntoIterator for &'e Enumerator<R, O>
where O: Operation<R>
{
    type Item = O::Item;
    type IntoIter = O::Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R, O> fmt::Display for Enumerator<R, O>
where
    R: fmt::Debug,
    O: Operation<R>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<Enumerator: {:?}:{}>", self.receiver, self.name())
    }
}
