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

//! Callback results and the early-exit signal.
//!
//! A callback that wants to leave a traversal early returns
//! [`ControlFlow::Break`]. The traversal stops at once and hands the break
//! value back to the caller unchanged. Plain callbacks are run through the same
//! machinery with an uninhabited break type.

use std::convert::Infallible;
use std::ops::ControlFlow;

/// A flow that can not break.
pub type NoBreak<C = ()> = ControlFlow<Infallible, C>;

/// Extracts the value of a flow whose break type is uninhabited.
pub fn into_continue<C>(flow: NoBreak<C>) -> C {
    match flow {
        ControlFlow::Continue(c) => c,
        ControlFlow::Break(never) => match never {},
    }
}
