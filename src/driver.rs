//! The window-position driver (spec §4.1): turns a plain input iterator and
//! an [`Aggregator`] into a lazy sequence of window reductions.
//!
//! Two driver types exist because indexed windows consume a structurally
//! different input (`(index, value)` pairs with a data-dependent eviction
//! count) than fixed/variable windows do (plain values, one eviction per
//! step once full). Both are pull-based: nothing runs until `next()` is
//! called, and the upstream iterator is only ever advanced forward.

use std::collections::VecDeque;
use std::fmt::Debug;

use crate::aggregator::Aggregator;
use crate::error::{Result, RollingError};
use crate::window::{WindowKind, WindowSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Still pulling from the upstream iterator.
    Running,
    /// Upstream is exhausted; shrinking a variable window back to nothing.
    Draining,
    /// Terminal state (spec §4.12); `extend` is the only way out.
    Done,
}

/// Drives a [`WindowSpec`]-described fixed or variable window over `iter`,
/// feeding an [`Aggregator`] and yielding its reduction at every step.
///
/// Constructed via an aggregator's `over`/`over_variable` constructors
/// rather than directly, though nothing prevents calling [`Rolling::new`].
pub struct Rolling<T, A: Aggregator<Input = T>> {
    iter: Box<dyn Iterator<Item = T>>,
    agg: A,
    spec: WindowSpec,
    obs: usize,
    phase: Phase,
}

impl<T: 'static, A: Aggregator<Input = T>> Rolling<T, A> {
    /// Build a new driver. `spec.kind()` must be `Fixed` or `Variable`;
    /// use [`IndexedRolling`] for indexed windows.
    pub fn new<I>(iter: I, spec: WindowSpec, agg: A) -> Result<Self>
    where
        I: Iterator<Item = T> + 'static,
    {
        if spec.kind() == WindowKind::Indexed {
            return Err(RollingError::WindowType {
                expected: "fixed or variable",
                found: "indexed",
            });
        }
        if !A::allowed_window_kinds().contains(&spec.kind()) {
            return Err(RollingError::WindowType {
                expected: "an operation-specific subset",
                found: spec.kind().name(),
            });
        }
        tracing::debug!(kind = spec.kind().name(), size = spec.size(), "rolling driver constructed");
        Ok(Self {
            iter: Box::new(iter),
            agg,
            spec,
            obs: 0,
            phase: Phase::Running,
        })
    }

    /// Total number of inputs ingested so far (`_obs` in spec terms).
    pub fn total_seen(&self) -> usize {
        self.obs
    }

    /// Number of elements currently retained in the window (`_i`).
    pub fn current_count(&self) -> usize {
        self.agg.current_count()
    }

    /// Append more input, resuming a drained aggregator (spec §4.2, §4.12).
    ///
    /// Equivalent in effect to having chained the iterables before
    /// construction, but legal after consumption has begun or even after
    /// the aggregator has drained.
    pub fn extend<I>(&mut self, more: I)
    where
        I: IntoIterator<Item = T> + 'static,
        I::IntoIter: 'static,
    {
        let old = std::mem::replace(&mut self.iter, Box::new(std::iter::empty()));
        self.iter = Box::new(old.chain(more.into_iter()));
        if self.phase == Phase::Done {
            tracing::debug!("extend re-activating a drained rolling driver");
            self.phase = Phase::Running;
        }
    }
}

impl<T: 'static, A: Aggregator<Input = T>> Iterator for Rolling<T, A> {
    type Item = Result<A::Output>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.phase {
                Phase::Done => return None,
                Phase::Running => match self.iter.next() {
                    Some(value) => {
                        if let Err(e) = self.agg.add_new(value) {
                            return Some(Err(e));
                        }
                        self.obs += 1;

                        let full = self.obs > self.spec.size();
                        if full {
                            if let Err(e) = self.agg.remove_old() {
                                return Some(Err(e));
                            }
                        }

                        let should_emit = match self.spec.kind() {
                            WindowKind::Variable => true,
                            WindowKind::Fixed => self.obs >= self.spec.size(),
                            WindowKind::Indexed => unreachable!("validated at construction"),
                        };
                        if should_emit {
                            return Some(self.agg.current_value());
                        }
                        // still priming a fixed window: loop for more input
                    }
                    None => {
                        if self.spec.kind() == WindowKind::Variable {
                            self.phase = Phase::Draining;
                        } else {
                            self.phase = Phase::Done;
                            return None;
                        }
                    }
                },
                Phase::Draining => {
                    // Shrink down to, but not including, the empty window:
                    // the concrete scenario in spec.md §8 stops at size 1.
                    if self.agg.current_count() > 1 {
                        if let Err(e) = self.agg.remove_old() {
                            return Some(Err(e));
                        }
                        return Some(self.agg.current_value());
                    }
                    self.phase = Phase::Done;
                    return None;
                }
            }
        }
    }
}

/// Drives an indexed window: the input is a stream of `(index, value)`
/// pairs with non-decreasing indices, and the window at any point holds
/// every retained pair whose index lies within `(current_index - size,
/// current_index]`.
pub struct IndexedRolling<Idx, T, A: Aggregator<Input = T>> {
    iter: Box<dyn Iterator<Item = (Idx, T)>>,
    agg: A,
    size: Idx,
    index_queue: VecDeque<Idx>,
    last_index: Option<Idx>,
    obs: usize,
    done: bool,
}

impl<Idx, T, A> IndexedRolling<Idx, T, A>
where
    Idx: Copy + PartialOrd + std::ops::Sub<Output = Idx> + Debug + 'static,
    T: 'static,
    A: Aggregator<Input = T>,
{
    /// Build a new indexed-window driver. `size` is an index distance, not
    /// an element count: the window holds every retained pair whose index
    /// is within `size` of the most recent one.
    pub fn new<I>(iter: I, size: Idx, agg: A) -> Result<Self>
    where
        I: Iterator<Item = (Idx, T)> + 'static,
    {
        if !A::allowed_window_kinds().contains(&WindowKind::Indexed) {
            return Err(RollingError::WindowType {
                expected: "an operation-specific subset",
                found: "indexed",
            });
        }
        Ok(Self {
            iter: Box::new(iter),
            agg,
            size,
            index_queue: VecDeque::new(),
            last_index: None,
            obs: 0,
            done: false,
        })
    }

    pub fn total_seen(&self) -> usize {
        self.obs
    }

    pub fn current_count(&self) -> usize {
        self.agg.current_count()
    }

    /// Append more (index, value) pairs, resuming a drained aggregator.
    pub fn extend<I>(&mut self, more: I)
    where
        I: IntoIterator<Item = (Idx, T)> + 'static,
        I::IntoIter: 'static,
    {
        let old = std::mem::replace(&mut self.iter, Box::new(std::iter::empty()));
        self.iter = Box::new(old.chain(more.into_iter()));
        if self.done {
            tracing::debug!("extend re-activating a drained indexed rolling driver");
        }
        self.done = false;
    }
}

impl<Idx, T, A> Iterator for IndexedRolling<Idx, T, A>
where
    Idx: Copy + PartialOrd + std::ops::Sub<Output = Idx> + Debug + 'static,
    T: 'static,
    A: Aggregator<Input = T>,
{
    type Item = Result<A::Output>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let (idx, value) = match self.iter.next() {
            Some(pair) => pair,
            None => {
                self.done = true;
                return None;
            }
        };

        if let Some(prev) = self.last_index {
            if idx < prev {
                self.done = true;
                return Some(Err(RollingError::index_order(&prev, &idx)));
            }
        }
        self.last_index = Some(idx);

        if let Err(e) = self.agg.add_new(value) {
            return Some(Err(e));
        }
        self.index_queue.push_back(idx);
        self.obs += 1;

        while let Some(&front) = self.index_queue.front() {
            if idx - front >= self.size {
                self.index_queue.pop_front();
                if let Err(e) = self.agg.remove_old() {
                    return Some(Err(e));
                }
            } else {
                break;
            }
        }

        Some(self.agg.current_value())
    }
}
