//! Generic aggregators: `Apply` and `ApplyPairwise` (spec §4.11), which
//! materialise the window buffer(s) and hand them to a user function rather
//! than maintaining any operation-specific incremental state.

use std::collections::VecDeque;
use std::marker::PhantomData;

use crate::aggregator::Aggregator;
use crate::error::{Result, RollingError};

/// Applies `func` to the window, materialised as a contiguous slice, on
/// every read. Update cost is whatever `func` costs; this aggregator adds
/// no incremental machinery of its own.
pub struct Apply<T, F, R> {
    ring: VecDeque<T>,
    func: F,
    _marker: PhantomData<R>,
}

impl<T, F, R> Apply<T, F, R>
where
    F: FnMut(&[T]) -> R,
{
    pub fn new(func: F) -> Self {
        Self {
            ring: VecDeque::new(),
            func,
            _marker: PhantomData,
        }
    }
}

impl<T, F, R> Aggregator for Apply<T, F, R>
where
    F: FnMut(&[T]) -> R,
{
    type Input = T;
    type Output = R;

    fn add_new(&mut self, value: T) -> Result<()> {
        self.ring.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        self.ring.pop_front().ok_or(RollingError::EmptyWindow)?;
        Ok(())
    }

    fn current_value(&mut self) -> Result<R> {
        Ok((self.func)(self.ring.make_contiguous()))
    }

    fn current_count(&self) -> usize {
        self.ring.len()
    }
}

/// Pairs up two parallel streams of equal length via [`zip_checked`] and
/// applies `func` to both windows at once. A length mismatch surfaces as a
/// single [`crate::error::RollingError::StreamMismatch`] at the point one
/// stream outlives the other.
pub struct ApplyPairwise<A, B, F, R> {
    ring_a: VecDeque<A>,
    ring_b: VecDeque<B>,
    func: F,
    total_a: usize,
    total_b: usize,
    _marker: PhantomData<R>,
}

impl<A, B, F, R> ApplyPairwise<A, B, F, R>
where
    F: FnMut(&[A], &[B]) -> R,
{
    pub fn new(func: F) -> Self {
        Self {
            ring_a: VecDeque::new(),
            ring_b: VecDeque::new(),
            func,
            total_a: 0,
            total_b: 0,
            _marker: PhantomData,
        }
    }
}

impl<A, B, F, R> Aggregator for ApplyPairwise<A, B, F, R>
where
    F: FnMut(&[A], &[B]) -> R,
{
    type Input = (Option<A>, Option<B>);
    type Output = R;

    fn add_new(&mut self, pair: (Option<A>, Option<B>)) -> Result<()> {
        match pair {
            (Some(a), Some(b)) => {
                self.ring_a.push_back(a);
                self.ring_b.push_back(b);
                self.total_a += 1;
                self.total_b += 1;
                Ok(())
            }
            (Some(_), None) => {
                self.total_a += 1;
                Err(RollingError::StreamMismatch {
                    a: self.total_a,
                    b: self.total_b,
                })
            }
            (None, Some(_)) => {
                self.total_b += 1;
                Err(RollingError::StreamMismatch {
                    a: self.total_a,
                    b: self.total_b,
                })
            }
            (None, None) => Ok(()),
        }
    }

    fn remove_old(&mut self) -> Result<()> {
        self.ring_a.pop_front().ok_or(RollingError::EmptyWindow)?;
        self.ring_b.pop_front();
        Ok(())
    }

    fn current_value(&mut self) -> Result<R> {
        Ok((self.func)(
            self.ring_a.make_contiguous(),
            self.ring_b.make_contiguous(),
        ))
    }

    fn current_count(&self) -> usize {
        self.ring_a.len()
    }
}

/// Zips two iterators, signalling a length mismatch instead of silently
/// truncating to the shorter one (the behaviour of [`Iterator::zip`]).
///
/// Yields `(Some, Some)` while both sides still produce values. The moment
/// one side ends before the other, yields exactly one `(Some, None)` or
/// `(None, Some)` carrying the straggling side's value, then stops — the
/// upstream `ApplyPairwise::add_new` turns that single event into a
/// `StreamMismatch` error.
pub fn zip_checked<IA, IB, A, B>(a: IA, b: IB) -> impl Iterator<Item = (Option<A>, Option<B>)>
where
    IA: Iterator<Item = A>,
    IB: Iterator<Item = B>,
{
    let mut a = a;
    let mut b = b;
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        match (a.next(), b.next()) {
            (Some(x), Some(y)) => Some((Some(x), Some(y))),
            (None, None) => None,
            (x, y) => {
                done = true;
                Some((x, y))
            }
        }
    })
}
