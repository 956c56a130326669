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

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A number that is either an integer or a float.
///
/// Comparison is numeric across the two representations: `Int(1) == Float(1.0)`.
/// Arithmetic between an integer and a float produces a float.
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    pub fn is_float(&self) -> bool {
        matches!(self, Num::Float(_))
    }

    pub fn is_zero(&self) -> bool {
        match *self {
            Num::Int(i) => i == 0,
            Num::Float(f) => f == 0.0,
        }
    }

    /// Whether the magnitude is infinite. Always `false` for an integer.
    pub fn is_infinite(&self) -> bool {
        match *self {
            Num::Int(_) => false,
            Num::Float(f) => f.is_infinite(),
        }
    }

    pub fn is_negative(&self) -> bool {
        match *self {
            Num::Int(i) => i < 0,
            Num::Float(f) => f < 0.0,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Num::Int(i) => i as f64,
            Num::Float(f) => f,
        }
    }

    /// Convert `self` to the representation of `other`: an integer becomes a
    /// float if `other` is a float. A float is never narrowed.
    pub fn promote_like(self, other: &Num) -> Num {
        match (self, other) {
            (Num::Int(i), Num::Float(_)) => Num::Float(i as f64),
            _ => self,
        }
    }

    /// `self + rhs`, or `None` if integer addition overflows.
    pub fn checked_add(self, rhs: Num) -> Option<Num> {
        match (self, rhs) {
            (Num::Int(a), Num::Int(b)) => a.checked_add(b).map(Num::Int),
            (a, b) => Some(Num::Float(a.as_f64() + b.as_f64())),
        }
    }

    /// `self - rhs`, or `None` if integer subtraction overflows.
    pub fn checked_sub(self, rhs: Num) -> Option<Num> {
        match (self, rhs) {
            (Num::Int(a), Num::Int(b)) => a.checked_sub(b).map(Num::Int),
            (a, b) => Some(Num::Float(a.as_f64() - b.as_f64())),
        }
    }

    /// `-self`, or `None` for `i64::MIN`.
    pub fn checked_neg(self) -> Option<Num> {
        match self {
            Num::Int(i) => i.checked_neg().map(Num::Int),
            Num::Float(f) => Some(Num::Float(-f)),
        }
    }

    /// The absolute value, or `None` for `i64::MIN`.
    pub fn abs(self) -> Option<Num> {
        match self {
            Num::Int(i) => i.checked_abs().map(Num::Int),
            Num::Float(f) => Some(Num::Float(f.abs())),
        }
    }

    /// `self + 1`, keeping the representation.
    pub fn succ(self) -> Option<Num> {
        self.checked_add(Num::Int(1))
    }
}

impl From<i64> for Num {
    fn from(i: i64) -> Self {
        Num::Int(i)
    }
}

impl From<i32> for Num {
    fn from(i: i32) -> Self {
        Num::Int(i as i64)
    }
}

impl From<f64> for Num {
    fn from(f: f64) -> Self {
        Num::Float(f)
    }
}

impl PartialEq for Num {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Num {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Num::Int(a), Num::Int(b)) => a.partial_cmp(b),
            (Num::Float(a), Num::Float(b)) => a.partial_cmp(b),
            (Num::Int(i), Num::Float(f)) => cmp_int_float(*i, *f),
            (Num::Float(f), Num::Int(i)) => cmp_int_float(*i, *f).map(Ordering::reverse),
        }
    }
}

/// Compares an integer with a float without rounding the integer.
fn cmp_int_float(i: i64, f: f64) -> Option<Ordering> {
    // 2^63, the first float above every i64
    const TWO_POW_63: f64 = 9223372036854775808.0;

    if f.is_nan() {
        return None;
    }
    if f >= TWO_POW_63 {
        return Some(Ordering::Less);
    }
    if f < -TWO_POW_63 {
        return Some(Ordering::Greater);
    }

    let t = f.trunc();
    match i.cmp(&(t as i64)) {
        Ordering::Equal => 0.0f64.partial_cmp(&(f - t)),
        ord => Some(ord),
    }
}

impl fmt::Debug for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Floats always show a fractional part, so `Float(1.0)` renders as `1.0`
/// and `Int(1)` as `1`.
impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Num::Int(i) => write!(f, "{}", i),
            Num::Float(x) if x.is_nan() => write!(f, "NaN"),
            Num::Float(x) if x.is_infinite() => {
                let sign = if x < 0.0 { "-" } else { "" };
                write!(f, "{}Infinity", sign)
            }
            Num::Float(x) if x.fract() == 0.0 && x.abs() < 1e16 => write!(f, "{:.1}", x),
            Num::Float(x) => write!(f, "{}", x),
        }
    }
}
