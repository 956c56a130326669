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

use crate::errors::RangeError;
use crate::num::Num;

/// A numeric range with optional bounds.
///
/// A missing `start` makes the range beginless, a missing `end` endless.
/// `exclusive` excludes `end` itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumRange {
    pub start: Option<Num>,
    pub end: Option<Num>,
    pub exclusive: bool,
}

/// `a < b`, or `a <= b` unless `exclusive`. Incomparable values are never less.
fn less(a: &Num, b: &Num, exclusive: bool) -> bool {
    match a.partial_cmp(b) {
        Some(Ordering::Less) => true,
        Some(Ordering::Equal) => !exclusive,
        Some(Ordering::Greater) | None => false,
    }
}

impl NumRange {
    /// `start..=end`
    pub fn inclusive(start: impl Into<Num>, end: impl Into<Num>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
            exclusive: false,
        }
    }

    /// `start..end`
    pub fn exclusive(start: impl Into<Num>, end: impl Into<Num>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
            exclusive: true,
        }
    }

    /// `start..`
    pub fn endless(start: impl Into<Num>) -> Self {
        Self {
            start: Some(start.into()),
            end: None,
            exclusive: false,
        }
    }

    /// `..=end`, or `..end` if `exclusive`.
    pub fn beginless(end: impl Into<Num>, exclusive: bool) -> Self {
        Self {
            start: None,
            end: Some(end.into()),
            exclusive,
        }
    }

    /// Whether `x` lies within the range, comparing with `<=` and `<`.
    pub fn cover(&self, x: &Num) -> bool {
        let after_start = match &self.start {
            None => true,
            Some(start) => less(start, x, false),
        };
        if !after_start {
            return false;
        }

        match &self.end {
            None => true,
            Some(end) => less(x, end, self.exclusive),
        }
    }

    /// Whether `other` overlaps `self`.
    ///
    /// `other` is rejected when one range's end is less than the other's
    /// start, using that end's exclusivity. So `(1..10)` does not cover
    /// `(10..20)` while `(1...10)` does. Two endless (or two beginless) ranges
    /// overlap if their bounds are comparable, and a fully open range on either
    /// side always overlaps.
    pub fn cover_range(&self, other: &NumRange) -> bool {
        match (&self.start, &self.end, &other.start, &other.end) {
            (None, None, _, _) => true,
            (_, _, None, None) => true,

            (Some(a), None, Some(c), None) => a.partial_cmp(c).is_some(),
            (Some(a), None, _, Some(d)) => !less(d, a, other.exclusive),

            (None, Some(b), None, Some(d)) => b.partial_cmp(d).is_some(),
            (None, Some(b), Some(c), _) => !less(b, c, self.exclusive),

            (Some(_), Some(b), Some(c), None) => less(c, b, self.exclusive),
            (Some(a), Some(_), None, Some(d)) => less(a, d, other.exclusive),
            (Some(a), Some(b), Some(c), Some(d)) => {
                !less(b, c, self.exclusive) && !less(d, a, other.exclusive)
            }
        }
    }

    /// Number of integers the range would iterate over.
    ///
    /// An endless range from an integer has an infinite size, returned as
    /// `Float(INFINITY)`. A range can only be counted from an integer start.
    pub fn size(&self) -> Result<Num, RangeError> {
        let start = match self.start {
            None => return Err(RangeError::CantIterateFrom("nil")),
            Some(Num::Float(_)) => return Err(RangeError::CantIterateFrom("Float")),
            Some(start) => start,
        };
        let Some(end) = self.end else {
            return Ok(Num::Float(f64::INFINITY));
        };

        let (beg_f, end_f) = (start.as_f64(), end.as_f64());
        let mut n = end_f - beg_f;
        let err = ((beg_f.abs() + end_f.abs() + n.abs()) * f64::EPSILON).min(0.5);

        if self.exclusive {
            if n <= 0.0 {
                return Ok(Num::Int(0));
            }
            n = if n < 1.0 { 0.0 } else { (n - err).floor() };
        } else {
            if n < 0.0 {
                return Ok(Num::Int(0));
            }
            n = (n + err).floor();
        }

        // Counts that do not fit an integer stay floats.
        if n >= i64::MAX as f64 {
            return Ok(Num::Float(n + 1.0));
        }
        Ok(Num::Int(n as i64 + 1))
    }

    /// Whether the range is empty: bounded with `start > end`, or with
    /// `start == end` and an excluded end. Incomparable bounds count as empty.
    pub fn is_empty(&self) -> bool {
        let (Some(start), Some(end)) = (&self.start, &self.end) else {
            return false;
        };

        match start.partial_cmp(end) {
            None | Some(Ordering::Greater) => true,
            Some(Ordering::Equal) => self.exclusive,
            Some(Ordering::Less) => false,
        }
    }
}

impl fmt::Display for NumRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = &self.start {
            write!(f, "{}", start)?;
        }
        write!(f, "{}", if self.exclusive { "..." } else { ".." })?;
        if let Some(end) = &self.end {
            write!(f, "{}", end)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cover_value() {
        let r = NumRange::inclusive(1, 10);
        assert!(r.cover(&Num::Int(1)));
        assert!(r.cover(&Num::Int(10)));
        assert!(r.cover(&Num::Float(5.5)));
        assert!(!r.cover(&Num::Int(11)));
        assert!(!r.cover(&Num::Float(0.9)));

        let r = NumRange::exclusive(1, 10);
        assert!(!r.cover(&Num::Int(10)));
        assert!(r.cover(&Num::Float(9.99)));

        assert!(NumRange::endless(3).cover(&Num::Int(i64::MAX)));
        assert!(!NumRange::endless(3).cover(&Num::Int(2)));
        assert!(NumRange::beginless(3, false).cover(&Num::Int(3)));
        assert!(!NumRange::beginless(3, true).cover(&Num::Int(3)));

        assert!(!r.cover(&Num::Float(f64::NAN)));
    }

    #[test]
    fn test_fully_open_range_covers_everything() {
        let r = NumRange {
            start: None,
            end: None,
            exclusive: false,
        };

        assert!(r.cover(&Num::Float(f64::NAN)));
        assert!(r.cover_range(&NumRange::inclusive(1, 2)));
    }

    #[test]
    fn test_cover_range() {
        let open = NumRange {
            start: None,
            end: None,
            exclusive: true,
        };

        // a..b
        let r = NumRange::inclusive(1, 10);
        assert!(r.cover_range(&NumRange::inclusive(2, 5)));
        assert!(r.cover_range(&NumRange::inclusive(1, 10)));
        assert!(r.cover_range(&open));
        assert!(!r.cover_range(&NumRange::inclusive(11, 20)));
        assert!(r.cover_range(&NumRange::exclusive(-5, 1)));
        assert!(!r.cover_range(&NumRange::inclusive(-5, 1)));
        assert!(!r.cover_range(&NumRange::inclusive(10, 20)));
        assert!(NumRange::exclusive(1, 10).cover_range(&NumRange::inclusive(10, 20)));
        assert!(r.cover_range(&NumRange::endless(5)));
        assert!(!NumRange::exclusive(1, 10).cover_range(&NumRange::endless(10)));
        assert!(NumRange::inclusive(1, 10).cover_range(&NumRange::endless(9)));
        assert!(r.cover_range(&NumRange::beginless(5, false)));
        assert!(!r.cover_range(&NumRange::beginless(1, true)));

        // a..
        let r = NumRange::endless(5);
        assert!(r.cover_range(&NumRange::endless(1)));
        assert!(r.cover_range(&NumRange::inclusive(6, 8)));
        assert!(!r.cover_range(&NumRange::inclusive(1, 5)));
        assert!(!r.cover_range(&NumRange::inclusive(1, 4)));
        assert!(r.cover_range(&NumRange::exclusive(1, 5)));
        assert!(!r.cover_range(&NumRange::endless(f64::NAN)));

        // ..b
        let r = NumRange::beginless(5, false);
        assert!(r.cover_range(&NumRange::beginless(100, false)));
        assert!(r.cover_range(&NumRange::inclusive(1, 3)));
        assert!(!r.cover_range(&NumRange::inclusive(6, 8)));
        assert!(!r.cover_range(&NumRange::endless(5)));
        assert!(NumRange::beginless(5, true).cover_range(&NumRange::endless(5)));
    }

    #[test]
    fn test_size() {
        assert_eq!(Ok(Num::Int(11)), NumRange::inclusive(10, 20).size());
        assert_eq!(Ok(Num::Int(10)), NumRange::exclusive(10, 20).size());
        assert_eq!(Ok(Num::Int(0)), NumRange::inclusive(5, 1).size());
        assert_eq!(Ok(Num::Int(0)), NumRange::exclusive(5, 5).size());
        assert_eq!(Ok(Num::Int(1)), NumRange::inclusive(5, 5).size());

        // A fractional end is counted up to the last integer step.
        assert_eq!(Ok(Num::Int(3)), NumRange::inclusive(1, 3.5).size());
        assert_eq!(Ok(Num::Int(1)), NumRange::exclusive(1, 1.5).size());
        assert_eq!(Ok(Num::Int(2)), NumRange::exclusive(1, 2.5).size());
    }

    #[test]
    fn test_size_beyond_integer_range() {
        assert_eq!(Ok(Num::Float(1e300)), NumRange::inclusive(0, 1e300).size());
        assert_eq!(
            Ok(Num::Int(4611686018427387905)),
            NumRange::inclusive(0, 4611686018427387904i64).size()
        );
    }

    #[test]
    fn test_size_unbounded_or_from_float() {
        assert_eq!(Ok(Num::Float(f64::INFINITY)), NumRange::endless(1).size());
        assert_eq!(
            Ok(Num::Float(f64::INFINITY)),
            NumRange::inclusive(0, f64::INFINITY).size()
        );

        assert_eq!(
            Err(RangeError::CantIterateFrom("Float")),
            NumRange::inclusive(1.0, 3).size()
        );
        assert_eq!(
            Err(RangeError::CantIterateFrom("nil")),
            NumRange::beginless(3, false).size()
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(!NumRange::inclusive(1, 1).is_empty());
        assert!(NumRange::exclusive(1, 1).is_empty());
        assert!(NumRange::inclusive(2, 1).is_empty());
        assert!(!NumRange::endless(5).is_empty());
        assert!(!NumRange::beginless(5, true).is_empty());
        assert!(NumRange::inclusive(1, f64::NAN).is_empty());
    }

    #[test]
    fn test_range_display_and_serde() -> anyhow::Result<()> {
        assert_eq!("1..10", NumRange::inclusive(1, 10).to_string());
        assert_eq!("1.5...", NumRange {
            start: Some(Num::Float(1.5)),
            end: None,
            exclusive: true
        }
        .to_string());
        assert_eq!("..3", NumRange::beginless(3, false).to_string());

        let r = NumRange::exclusive(1, 2.5);
        let json = serde_json::to_string(&r)?;
        assert_eq!(r#"{"start":1,"end":2.5,"exclusive":true}"#, json);
        assert_eq!(r, serde_json::from_str::<NumRange>(&json)?);

        Ok(())
    }
}
