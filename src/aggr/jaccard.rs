//! Rolling Jaccard similarity against a fixed target set (spec §4.10).

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

use crate::aggregator::Aggregator;
use crate::error::{Result, RollingError};

/// `|intersection| / |union|` between the current window (as a set) and a
/// fixed `target_set`, maintained incrementally: membership transitions
/// (a value's window count crossing 0 -> 1 or 1 -> 0) are the only events
/// that move the running intersection/union counters.
pub struct JaccardIndex<T> {
    target: HashSet<T>,
    counts: HashMap<T, usize>,
    ring: VecDeque<T>,
    intersection: usize,
    union: usize,
}

impl<T: Eq + Hash + Clone> JaccardIndex<T> {
    pub fn new(target_set: HashSet<T>) -> Self {
        // The union always contains every target element, whether or not
        // the window has observed it yet; only non-target window values
        // grow it further.
        let union = target_set.len();
        Self {
            target: target_set,
            counts: HashMap::new(),
            ring: VecDeque::new(),
            intersection: 0,
            union,
        }
    }
}

impl<T: Eq + Hash + Clone> Aggregator for JaccardIndex<T> {
    type Input = T;
    type Output = f64;

    fn add_new(&mut self, value: T) -> Result<()> {
        let count = self.counts.entry(value.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            if self.target.contains(&value) {
                self.intersection += 1;
            } else {
                self.union += 1;
            }
        }
        self.ring.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        let old = self.ring.pop_front().ok_or(RollingError::EmptyWindow)?;
        if let Some(count) = self.counts.get_mut(&old) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&old);
                if self.target.contains(&old) {
                    self.intersection -= 1;
                } else {
                    self.union -= 1;
                }
            }
        }
        Ok(())
    }

    fn current_value(&mut self) -> Result<f64> {
        if self.union == 0 {
            Ok(0.0)
        } else {
            Ok(self.intersection as f64 / self.union as f64)
        }
    }

    fn current_count(&self) -> usize {
        self.ring.len()
    }
}
