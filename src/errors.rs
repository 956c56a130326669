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

//! Errors returned by the iteration and transformation operations.
//!
//! Only argument and type checks fail. Empty containers, empty ranges and
//! missing keys are not errors.

/// Errors raised by `step` before any element is produced.
#[derive(Clone, PartialEq, Eq, thiserror::Error, Debug)]
pub enum StepError {
    /// The increment is zero, so the sequence would never advance.
    #[error("step can't be 0")]
    ZeroStep,
}

/// Errors raised by `merge`.
#[derive(Clone, PartialEq, Eq, thiserror::Error, Debug)]
pub enum MergeError {
    /// A positional argument is not an associative container.
    ///
    /// `position` is 1-based, counted over the merge arguments.
    #[error("Hash required ({given} given) at argument {position}")]
    HashRequired { position: usize, given: &'static str },
}

/// Errors raised when a numeric range can not be counted.
#[derive(Clone, PartialEq, Eq, thiserror::Error, Debug)]
pub enum RangeError {
    #[error("can't iterate from {0}")]
    CantIterateFrom(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!("step can't be 0", StepError::ZeroStep.to_string());
        assert_eq!(
            "Hash required (Integer given) at argument 2",
            MergeError::HashRequired {
                position: 2,
                given: "Integer"
            }
            .to_string()
        );
        assert_eq!(
            "can't iterate from Float",
            RangeError::CantIterateFrom("Float").to_string()
        );
    }
}
