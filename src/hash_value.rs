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

use std::fmt;

/// Trait for types that can be stored as values of an ordered hash.
///
/// A value is cloned into every snapshot taken of its container, so a cheap
/// `Clone` (such as an `Rc` or a small scalar) keeps traversals cheap.
///
/// This trait is automatically implemented for any type that meets the trait bounds.
pub trait HashValue
where Self: Clone + fmt::Debug
{
}

impl<V> HashValue for V where V: Clone + fmt::Debug {}
