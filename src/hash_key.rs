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
use std::hash::Hash;

/// Trait for types that can be used as keys of an ordered hash.
///
/// # Requirements
///
/// - **Hashing**: `Hash + Eq` locates an entry by key
/// - **Cloning**: `Clone` lets a traversal capture a snapshot of the keys
/// - **Debugging**: `Debug` renders containers and enumerators
///
/// # Automatic Implementation
///
/// This trait is automatically implemented for any type that meets the trait bounds.
pub trait HashKey
where Self: Clone + Eq + Hash + fmt::Debug
{
}

impl<K> HashKey for K where K: Clone + Eq + Hash + fmt::Debug {}
