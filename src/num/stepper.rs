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

//! Arithmetic sequences: `times`, `upto`, `downto` and `step`.
//!
//! The pull iterators returned here and the callback forms run the same
//! iterator, so both see exactly the same sequence. A sequence without a limit
//! never ends on its own; the callback has to break out, or the puller has to
//! stop pulling.

use std::fmt;
use std::ops::ControlFlow;
use std::ops::Range;

use log::warn;

use crate::enumerator::Enumerator;
use crate::enumerator::Operation;
use crate::errors::StepError;
use crate::num::Num;

/// The `times` operation: yields `0..receiver`.
#[derive(Debug, Clone, Default)]
pub struct Times;

/// The `upto` operation: yields `receiver, receiver + 1, ...` while `<= limit`.
#[derive(Debug, Clone)]
pub struct Upto {
    pub limit: Num,
}

/// The `downto` operation: yields `receiver, receiver - 1, ...` while `>= limit`.
#[derive(Debug, Clone)]
pub struct Downto {
    pub limit: Num,
}

/// The `step` operation with its validated arguments.
///
/// The increment is never zero: [`Step::new`] is the only way to build one.
#[derive(Debug, Clone)]
pub struct Step {
    limit: Option<Num>,
    increment: Num,
}

impl Step {
    pub fn new(limit: Option<Num>, increment: Num) -> Result<Self, StepError> {
        if increment.is_zero() {
            return Err(StepError::ZeroStep);
        }
        Ok(Self { limit, increment })
    }

    pub fn limit(&self) -> Option<Num> {
        self.limit
    }

    pub fn increment(&self) -> Num {
        self.increment
    }
}

/// Integer counter moving by one towards a possibly fractional limit.
#[derive(Debug, Clone)]
pub struct IntSeq {
    next: Option<i64>,
    limit: Num,
    descending: bool,
}

impl Iterator for IntSeq {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let i = self.next.take()?;

        let within = if self.descending {
            Num::Int(i) >= self.limit
        } else {
            Num::Int(i) <= self.limit
        };
        if !within {
            return None;
        }

        let delta = if self.descending { -1 } else { 1 };
        self.next = i.checked_add(delta);
        if self.next.is_none() && Num::Int(i) != self.limit {
            warn!("integer counter overflowed at {}, before reaching {}", i, self.limit);
        }

        Some(i)
    }
}

/// The running counter of a `step` sequence.
///
/// Each element is the previous one plus the increment, so float rounding
/// error accumulates the way repeated addition does.
#[derive(Debug, Clone)]
pub struct StepSeq {
    next: Option<Num>,
    increment: Num,
    limit: Option<Num>,

    /// An infinite increment leaves every finite limit behind in one step:
    /// the counter is yielded at most once.
    once: bool,
}

impl StepSeq {
    fn new(counter: Num, step: &Step) -> Self {
        Self {
            next: Some(counter),
            increment: step.increment,
            limit: step.limit,
            once: step.increment.is_infinite(),
        }
    }

    fn within(&self, i: &Num) -> bool {
        match &self.limit {
            None => true,
            Some(limit) if self.increment.is_negative() => i >= limit,
            Some(limit) => i <= limit,
        }
    }
}

impl Iterator for StepSeq {
    type Item = Num;

    fn next(&mut self) -> Option<Num> {
        let i = self.next.take()?;
        if !self.within(&i) {
            return None;
        }

        if !self.once {
            self.next = i.checked_add(self.increment);
            if self.next.is_none() {
                warn!("step counter overflowed at {} with increment {}, sequence ends", i, self.increment);
            }
        }

        Some(i)
    }
}

/// Feed every element of `iter` to `f`, stopping at the first break.
fn drive_seq<I, B, F>(iter: I, mut f: F) -> ControlFlow<B>
where
    I: Iterator,
    F: FnMut(&I::Item) -> ControlFlow<B>,
{
    for i in iter {
        f(&i)?;
    }
    ControlFlow::Continue(())
}

impl Operation<i64> for Times {
    type Item = i64;
    type Reply = ();
    type Output = i64;
    type Iter = Range<i64>;

    fn name(&self) -> &'static str {
        "times"
    }

    fn start(&self, receiver: &i64) -> Range<i64> {
        0..*receiver
    }

    fn drive<B, F>(&self, receiver: i64, f: F) -> ControlFlow<B, i64>
    where F: FnMut(&i64) -> ControlFlow<B> {
        drive_seq(self.start(&receiver), f)?;
        ControlFlow::Continue(receiver)
    }
}

impl Operation<i64> for Upto {
    type Item = i64;
    type Reply = ();
    type Output = i64;
    type Iter = IntSeq;

    fn name(&self) -> &'static str {
        "upto"
    }

    fn start(&self, receiver: &i64) -> IntSeq {
        IntSeq {
            next: Some(*receiver),
            limit: self.limit,
            descending: false,
        }
    }

    fn drive<B, F>(&self, receiver: i64, f: F) -> ControlFlow<B, i64>
    where F: FnMut(&i64) -> ControlFlow<B> {
        drive_seq(self.start(&receiver), f)?;
        ControlFlow::Continue(receiver)
    }
}

impl Operation<i64> for Downto {
    type Item = i64;
    type Reply = ();
    type Output = i64;
    type Iter = IntSeq;

    fn name(&self) -> &'static str {
        "downto"
    }

    fn start(&self, receiver: &i64) -> IntSeq {
        IntSeq {
            next: Some(*receiver),
            limit: self.limit,
            descending: true,
        }
    }

    fn drive<B, F>(&self, receiver: i64, f: F) -> ControlFlow<B, i64>
    where F: FnMut(&i64) -> ControlFlow<B> {
        drive_seq(self.start(&receiver), f)?;
        ControlFlow::Continue(receiver)
    }
}

impl<R> Operation<R> for Step
where R: Stepper
{
    type Item = Num;
    type Reply = ();
    type Output = R;
    type Iter = StepSeq;

    fn name(&self) -> &'static str {
        "step"
    }

    fn start(&self, receiver: &R) -> StepSeq {
        StepSeq::new(receiver.counter_for(&self.increment), self)
    }

    fn drive<B, F>(&self, receiver: R, f: F) -> ControlFlow<B, R>
    where F: FnMut(&Num) -> ControlFlow<B> {
        drive_seq(self.start(&receiver), f)?;
        ControlFlow::Continue(receiver)
    }
}

/// `times`, `upto`, `downto` and `succ` on integers.
pub trait IntegerStepper: Sized {
    fn times(self) -> Enumerator<Self, Times>;

    /// Call `f` with `0, 1, ..., self - 1`. Nothing happens if `self <= 0`.
    fn times_with<F>(self, f: F) -> Self
    where F: FnMut(i64);

    fn try_times_with<B, F>(self, f: F) -> ControlFlow<B, Self>
    where F: FnMut(i64) -> ControlFlow<B>;

    fn upto(self, limit: impl Into<Num>) -> Enumerator<Self, Upto>;

    /// Call `f` with `self, self + 1, ...` while the counter is `<= limit`.
    ///
    /// ```
    /// use iter_api::num::IntegerStepper;
    ///
    /// let mut seen = vec![];
    /// let got = 1i64.upto_with(3.5, |i| seen.push(i));
    ///
    /// assert_eq!(1, got);
    /// assert_eq!(vec![1, 2, 3], seen);
    /// ```
    fn upto_with<F>(self, limit: impl Into<Num>, f: F) -> Self
    where F: FnMut(i64);

    fn try_upto_with<B, F>(self, limit: impl Into<Num>, f: F) -> ControlFlow<B, Self>
    where F: FnMut(i64) -> ControlFlow<B>;

    fn downto(self, limit: impl Into<Num>) -> Enumerator<Self, Downto>;

    /// Call `f` with `self, self - 1, ...` while the counter is `>= limit`.
    fn downto_with<F>(self, limit: impl Into<Num>, f: F) -> Self
    where F: FnMut(i64);

    fn try_downto_with<B, F>(self, limit: impl Into<Num>, f: F) -> ControlFlow<B, Self>
    where F: FnMut(i64) -> ControlFlow<B>;

    /// `self + 1`, or `None` on overflow.
    fn succ(self) -> Option<Self>;
}

impl IntegerStepper for i64 {
    fn times(self) -> Enumerator<i64, Times> {
        Enumerator::new(self, Times)
    }

    fn times_with<F>(self, mut f: F) -> i64
    where F: FnMut(i64) {
        self.times().call(|i| f(*i))
    }

    fn try_times_with<B, F>(self, mut f: F) -> ControlFlow<B, i64>
    where F: FnMut(i64) -> ControlFlow<B> {
        self.times().try_call(|i| f(*i))
    }

    fn upto(self, limit: impl Into<Num>) -> Enumerator<i64, Upto> {
        Enumerator::new(self, Upto { limit: limit.into() })
    }

    fn upto_with<F>(self, limit: impl Into<Num>, mut f: F) -> i64
    where F: FnMut(i64) {
        self.upto(limit).call(|i| f(*i))
    }

    fn try_upto_with<B, F>(self, limit: impl Into<Num>, mut f: F) -> ControlFlow<B, i64>
    where F: FnMut(i64) -> ControlFlow<B> {
        self.upto(limit).try_call(|i| f(*i))
    }

    fn downto(self, limit: impl Into<Num>) -> Enumerator<i64, Downto> {
        Enumerator::new(self, Downto { limit: limit.into() })
    }

    fn downto_with<F>(self, limit: impl Into<Num>, mut f: F) -> i64
    where F: FnMut(i64) {
        self.downto(limit).call(|i| f(*i))
    }

    fn try_downto_with<B, F>(self, limit: impl Into<Num>, mut f: F) -> ControlFlow<B, i64>
    where F: FnMut(i64) -> ControlFlow<B> {
        self.downto(limit).try_call(|i| f(*i))
    }

    fn succ(self) -> Option<i64> {
        self.checked_add(1)
    }
}

/// `step` on any number.
///
/// All three forms fail with [`StepError::ZeroStep`] before anything runs if
/// the increment is zero.
pub trait Stepper: Copy + fmt::Debug {
    /// The initial value of the running counter, in the representation the
    /// sequence uses with `increment`.
    fn counter_for(&self, increment: &Num) -> Num;

    /// A lazy `step` sequence. `limit: None` makes it unbounded.
    fn step(self, limit: Option<Num>, increment: impl Into<Num>) -> Result<Enumerator<Self, Step>, StepError> {
        let step = Step::new(limit, increment.into())?;
        Ok(Enumerator::new(self, step))
    }

    /// Call `f` with `self, self + increment, ...` until the counter passes
    /// `limit`.
    ///
    /// With `limit: None` this never returns; use
    /// [`try_step_with`](Stepper::try_step_with) to stop.
    fn step_with<F>(self, limit: Option<Num>, increment: impl Into<Num>, mut f: F) -> Result<Self, StepError>
    where F: FnMut(Num) {
        let e = self.step(limit, increment)?;
        Ok(e.call(|i| f(*i)))
    }

    fn try_step_with<B, F>(
        self,
        limit: Option<Num>,
        increment: impl Into<Num>,
        mut f: F,
    ) -> Result<ControlFlow<B, Self>, StepError>
    where
        F: FnMut(Num) -> ControlFlow<B>,
    {
        let e = self.step(limit, increment)?;
        Ok(e.try_call(|i| f(*i)))
    }
}

/// An integer receiver takes the representation of the increment.
impl Stepper for i64 {
    fn counter_for(&self, increment: &Num) -> Num {
        Num::Int(*self).promote_like(increment)
    }
}

impl Stepper for f64 {
    fn counter_for(&self, _increment: &Num) -> Num {
        Num::Float(*self)
    }
}

impl Stepper for Num {
    fn counter_for(&self, increment: &Num) -> Num {
        self.promote_like(increment)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn collect_step<R: Stepper>(r: R, limit: Option<Num>, increment: impl Into<Num>) -> Vec<Num> {
        let mut got = vec![];
        r.step_with(limit, increment, |i| got.push(i)).unwrap();
        got
    }

    #[test]
    fn test_times() {
        let mut seen = vec![];
        assert_eq!(3, 3i64.times_with(|i| seen.push(i)));
        assert_eq!(vec![0, 1, 2], seen);

        let mut calls = 0;
        0i64.times_with(|_| calls += 1);
        (-2i64).times_with(|_| calls += 1);
        assert_eq!(0, calls);

        let e = 4i64.times();
        assert_eq!("times", e.name());
        assert_eq!(vec![0, 1, 2, 3], e.iter().collect::<Vec<_>>());
        assert_eq!(vec![0, 1, 2, 3], e.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_upto() {
        let mut seen = vec![];
        assert_eq!(1, 1i64.upto_with(3, |i| seen.push(i)));
        assert_eq!(vec![1, 2, 3], seen);

        let mut calls = 0;
        3i64.upto_with(1, |_| calls += 1);
        assert_eq!(0, calls);

        assert_eq!(vec![1, 2, 3], 1i64.upto(3.5).iter().collect::<Vec<_>>());
        assert_eq!(vec![i64::MAX - 1, i64::MAX], (i64::MAX - 1).upto(i64::MAX).iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_downto() {
        let mut seen = vec![];
        assert_eq!(5, 5i64.downto_with(5, |i| seen.push(i)));
        assert_eq!(vec![5], seen);

        assert_eq!(vec![3, 2, 1], 3i64.downto(0.5).iter().collect::<Vec<_>>());
        assert_eq!(Vec::<i64>::new(), 1i64.downto(3).iter().collect::<Vec<_>>());
        assert_eq!("downto", 1i64.downto(0).name());
    }

    #[test]
    fn test_try_upto_breaks() {
        let mut seen = vec![];
        let got = 1i64.try_upto_with(100, |i| {
            seen.push(i);
            if i == 3 {
                ControlFlow::Break(i * 10)
            } else {
                ControlFlow::Continue(())
            }
        });

        assert_eq!(ControlFlow::Break(30), got);
        assert_eq!(vec![1, 2, 3], seen);

        assert_eq!(ControlFlow::<(), i64>::Continue(2), 2i64.try_times_with(|_| ControlFlow::Continue(())));
        assert_eq!(ControlFlow::Break(4), 4i64.try_downto_with(0, ControlFlow::Break));
    }

    #[test]
    fn test_integer_succ() {
        assert_eq!(Some(8), 7i64.succ());
        assert_eq!(None, i64::MAX.succ());
    }

    #[test]
    fn test_step_integer() {
        assert_eq!(
            vec![Num::Int(1), Num::Int(4), Num::Int(7), Num::Int(10)],
            collect_step(1i64, Some(Num::Int(10)), 3)
        );
        assert!(collect_step(1i64, Some(Num::Int(10)), 3).iter().all(|n| !n.is_float()));

        assert_eq!(
            vec![Num::Int(10), Num::Int(7), Num::Int(4), Num::Int(1)],
            collect_step(10i64, Some(Num::Int(1)), -3)
        );
        assert_eq!(Vec::<Num>::new(), collect_step(10i64, Some(Num::Int(1)), 3));
    }

    #[test]
    fn test_step_zero_increment_fails_eagerly() {
        assert_eq!(Some(StepError::ZeroStep), 1i64.step(Some(Num::Int(10)), 0).err());
        assert_eq!(Some(StepError::ZeroStep), 1i64.step(None, 0).err());
        assert_eq!(Some(StepError::ZeroStep), 1.5f64.step(None, 0.0).err());

        let mut calls = 0;
        let got = 1i64.step_with(Some(Num::Int(3)), 0, |_| calls += 1);
        assert_eq!(Err(StepError::ZeroStep), got);

        let got = Num::Int(1).try_step_with(None, Num::Float(-0.0), |_| {
            calls += 1;
            ControlFlow::Break(())
        });
        assert!(got.is_err());
        assert_eq!(0, calls);
    }

    #[test]
    fn test_step_promotes_integer_receiver() {
        let got = collect_step(1i64, Some(Num::Int(2)), 0.5);
        assert_eq!(vec![Num::Float(1.0), Num::Float(1.5), Num::Float(2.0)], got);
        assert!(got.iter().all(|n| n.is_float()));

        assert_eq!("1.0", got[0].to_string());

        // A float receiver stays float with an integer increment.
        let got = collect_step(1.0f64, Some(Num::Int(3)), 1);
        assert!(got.iter().all(|n| n.is_float()));
        assert_eq!(3, got.len());
    }

    #[test]
    fn test_step_float_accumulates_by_addition() {
        let got = collect_step(0.0f64, Some(Num::Float(1.0)), 0.1);

        let mut want = vec![];
        let mut x = 0.0_f64;
        while x <= 1.0 {
            want.push(Num::Float(x));
            x += 0.1;
        }

        assert_eq!(want.len(), got.len());
        for (w, g) in want.iter().zip(got.iter()) {
            assert_eq!(w.as_f64().to_bits(), g.as_f64().to_bits());
        }
    }

    #[test]
    fn test_step_infinite_increment() {
        let inf = f64::INFINITY;

        assert_eq!(vec![Num::Float(1.0)], collect_step(1.0f64, Some(Num::Float(2.0)), inf));
        assert_eq!(Vec::<Num>::new(), collect_step(3.0f64, Some(Num::Float(2.0)), inf));
        assert_eq!(vec![Num::Float(3.0)], collect_step(3.0f64, Some(Num::Float(2.0)), -inf));

        // No limit: always exactly once.
        assert_eq!(vec![Num::Float(-5.0)], collect_step(-5.0f64, None, inf));
        assert_eq!(vec![Num::Float(5.0)], collect_step(5i64, None, -inf));
    }

    #[test]
    fn test_step_unbounded_until_break() {
        let mut seen = vec![];
        let got = 1i64.try_step_with(None, 2, |i| {
            seen.push(i);
            if seen.len() == 4 {
                ControlFlow::Break("enough")
            } else {
                ControlFlow::Continue(())
            }
        });

        assert_eq!(Ok(ControlFlow::Break("enough")), got);
        assert_eq!(vec![Num::Int(1), Num::Int(3), Num::Int(5), Num::Int(7)], seen);
    }

    #[test]
    fn test_step_unbounded_pull() -> anyhow::Result<()> {
        let e = 0.5f64.step(None, -1)?;

        let got = e.iter().take(3).collect::<Vec<_>>();
        assert_eq!(vec![Num::Float(0.5), Num::Float(-0.5), Num::Float(-1.5)], got);

        // Restartable.
        assert_eq!(got, e.iter().take(3).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_step_ends_on_integer_overflow() {
        let got = collect_step(i64::MAX - 2, None, 2);
        assert_eq!(vec![Num::Int(i64::MAX - 2), Num::Int(i64::MAX)], got);
    }

    #[test]
    fn test_step_enumerator() -> anyhow::Result<()> {
        let e = Num::Int(2).step(Some(Num::Int(6)), 2)?;
        assert_eq!("step", e.name());
        assert_eq!("#<Enumerator: 2:step>", e.to_string());
        assert_eq!(Some(Num::Int(6)), e.operation().limit());
        assert_eq!(Num::Int(2), e.operation().increment());

        let mut seen = vec![];
        let got = e.call(|i| seen.push(*i));
        assert_eq!(Num::Int(2), got);
        assert_eq!(vec![Num::Int(2), Num::Int(4), Num::Int(6)], seen);

        Ok(())
    }

    #[tokio::test]
    async fn test_upto_into_stream() {
        use futures_util::StreamExt;

        let got = 1i64.upto(4).into_stream().collect::<Vec<_>>().await;
        assert_eq!(vec![1, 2, 3, 4], got);
    }
}
