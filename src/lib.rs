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

//! # Iter API
//!
//! Callback-or-enumerator iteration over insertion-ordered associative
//! containers and numeric sequences.
//!
//! Every iteration-capable operation comes in three forms:
//!
//! - `op(..)` performs no work and returns an [`Enumerator`]: a restartable
//!   handle that can be pulled as an [`Iterator`] or run with a callback later.
//! - `op_with(.., f)` runs `f` inline, once per element, in order.
//! - `try_op_with(.., f)` runs a callback returning [`ControlFlow`]. A
//!   `Break` stops the operation at once and is handed back to the caller.
//!
//! Container walks iterate over a [`Snapshot`](snapshot::Snapshot) taken on
//! entry, so a callback may mutate the container being walked.
//!
//! ## Core Components
//!
//! - [`HashApiRO`] and [`HashApi`]: the container primitives
//! - [`HashTraversal`]: `each`, `each_key`, `each_value`
//! - [`HashTransform`]: `delete`, `merge`, `select`, `reject` and their in-place forms
//! - [`IntegerStepper`] and [`Stepper`]: `times`, `upto`, `downto`, `step`
//!
//! ## Usage Example
//!
//! ```rust
//! use std::ops::ControlFlow;
//!
//! use iter_api::impls::ordered_hash::OrderedHash;
//! use iter_api::HashApiRO;
//! use iter_api::HashTransform;
//! use iter_api::HashTraversal;
//! use iter_api::Num;
//! use iter_api::Stepper;
//!
//! let h = OrderedHash::from([("a", 100), ("b", 200), ("c", 300)]);
//!
//! // Lazy: nothing runs until the enumerator is consumed.
//! let keys = h.each_key().iter().collect::<Vec<_>>();
//! assert_eq!(vec!["a", "b", "c"], keys);
//!
//! let big = h.select_with(|_k, v| *v > 100);
//! assert_eq!(vec!["b", "c"], big.keys());
//!
//! // An unbounded sequence, stopped from the callback.
//! let mut seen = vec![];
//! let got = 1i64.try_step_with(None, 3, |i| {
//!     seen.push(i);
//!     if seen.len() == 3 {
//!         ControlFlow::Break(())
//!     } else {
//!         ControlFlow::Continue(())
//!     }
//! });
//!
//! assert_eq!(Ok(ControlFlow::Break(())), got);
//! assert_eq!(vec![Num::Int(1), Num::Int(4), Num::Int(7)], seen);
//! ```
//!
//! [`ControlFlow`]: std::ops::ControlFlow

pub mod enumerator;
pub mod errors;
pub mod flow;
pub mod hash;
pub mod hash_api;
pub mod hash_api_ro;
pub mod hash_key;
pub mod hash_value;
pub mod impls;
pub mod num;
pub mod snapshot;

pub use crate::enumerator::Enumerator;
pub use crate::enumerator::Operation;
pub use crate::errors::MergeError;
pub use crate::errors::RangeError;
pub use crate::errors::StepError;
pub use crate::hash::HashTransform;
pub use crate::hash::HashTraversal;
pub use crate::hash::MergeSource;
pub use crate::hash_api::HashApi;
pub use crate::hash_api_ro::HashApiRO;
pub use crate::hash_key::HashKey;
pub use crate::hash_value::HashValue;
pub use crate::num::IntegerStepper;
pub use crate::num::Num;
pub use crate::num::NumRange;
pub use crate::num::Stepper;
