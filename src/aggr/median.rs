//! Rolling median via the indexable skiplist in [`crate::skiplist`] (spec §4.6).

use std::collections::VecDeque;

use crate::aggregator::Aggregator;
use crate::error::{Result, RollingError};
use crate::skiplist::SkipList;

/// Rolling median. The skiplist keeps the window sorted; a parallel ring
/// buffer remembers insertion order so the oldest value can be evicted by
/// content rather than by position.
pub struct Median<T> {
    sorted: SkipList<T>,
    ring: VecDeque<T>,
}

impl<T: PartialOrd + Clone> Median<T> {
    pub fn new() -> Self {
        Self {
            sorted: SkipList::new(),
            ring: VecDeque::new(),
        }
    }
}

impl<T: PartialOrd + Clone> Default for Median<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Aggregator for Median<T>
where
    T: PartialOrd + Clone + Into<f64>,
{
    type Input = T;
    type Output = f64;

    fn add_new(&mut self, value: T) -> Result<()> {
        self.sorted.insert(value.clone());
        self.ring.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        match self.ring.pop_front() {
            Some(old) => {
                self.sorted.remove(&old);
                Ok(())
            }
            None => Err(RollingError::EmptyWindow),
        }
    }

    fn current_value(&mut self) -> Result<f64> {
        let i = self.ring.len();
        if i == 0 {
            return Err(RollingError::InsufficientData {
                required: 1,
                available: 0,
            });
        }
        if i % 2 == 1 {
            let mid = self.sorted.rank(i / 2).expect("rank within bounds");
            Ok(mid.clone().into())
        } else {
            let lo = self.sorted.rank(i / 2 - 1).expect("rank within bounds");
            let hi = self.sorted.rank(i / 2).expect("rank within bounds");
            Ok((lo.clone().into() + hi.clone().into()) / 2.0)
        }
    }

    fn current_count(&self) -> usize {
        self.ring.len()
    }
}
