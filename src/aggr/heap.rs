//! Rolling minimum via a lazy-deletion binary heap (spec §4.4) — an
//! alternative to [`super::extrema::Min`]'s monotonic deque, useful when
//! values only need `Ord` and the deque's domination-pruning isn't wanted.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::aggregator::Aggregator;
use crate::error::{Result, RollingError};

/// Rolling minimum. Stale entries (evicted from the window but not yet
/// popped from the heap) are purged lazily, on read.
pub struct MinHeap<T: Ord> {
    heap: BinaryHeap<Reverse<(T, usize)>>,
    obs: usize,
    i: usize,
}

impl<T: Ord + Clone> MinHeap<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            obs: 0,
            i: 0,
        }
    }

    fn purge(&mut self) {
        let watermark = self.obs.saturating_sub(self.i);
        while let Some(Reverse((_, birth))) = self.heap.peek() {
            if *birth < watermark {
                self.heap.pop();
            } else {
                break;
            }
        }
    }
}

impl<T: Ord + Clone> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> Aggregator for MinHeap<T> {
    type Input = T;
    type Output = T;

    fn add_new(&mut self, value: T) -> Result<()> {
        self.heap.push(Reverse((value, self.obs)));
        self.obs += 1;
        self.i += 1;
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        if self.i == 0 {
            return Err(RollingError::EmptyWindow);
        }
        self.i -= 1;
        Ok(())
    }

    fn current_value(&mut self) -> Result<T> {
        self.purge();
        self.heap
            .peek()
            .map(|Reverse((v, _))| v.clone())
            .ok_or(RollingError::InsufficientData {
                required: 1,
                available: 0,
            })
    }

    fn current_count(&self) -> usize {
        self.i
    }
}
