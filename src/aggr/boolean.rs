//! Boolean/structural aggregators: `Any`, `All`, `Monotonic`, `Match`
//! (spec §4.8) — constant-memory streak counters, plus `Match` which
//! compares the window against a fixed target sequence.

use std::collections::VecDeque;

use crate::aggregator::Aggregator;
use crate::error::Result;

/// True if at least one retained value is truthy. Tracked as a streak of
/// consecutive falsy values currently forming the prefix of the window:
/// `current_value = _i > streak`.
pub struct Any {
    ring: VecDeque<bool>,
    falsy_prefix: usize,
}

impl Any {
    pub fn new() -> Self {
        Self {
            ring: VecDeque::new(),
            falsy_prefix: 0,
        }
    }

    fn recompute_prefix(&mut self) {
        self.falsy_prefix = self.ring.iter().take_while(|&&v| !v).count();
    }
}

impl Default for Any {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator for Any {
    type Input = bool;
    type Output = bool;

    fn add_new(&mut self, value: bool) -> Result<()> {
        if !value && self.falsy_prefix == self.ring.len() {
            self.falsy_prefix += 1;
        }
        self.ring.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        self.ring.pop_front();
        if self.falsy_prefix > 0 {
            self.falsy_prefix -= 1;
        } else {
            self.recompute_prefix();
        }
        Ok(())
    }

    fn current_value(&mut self) -> Result<bool> {
        Ok(self.ring.len() > self.falsy_prefix)
    }

    fn current_count(&self) -> usize {
        self.ring.len()
    }
}

/// True only if every retained value is truthy. Tracked as a streak of
/// consecutive truthy values forming the full window.
pub struct All {
    ring: VecDeque<bool>,
    truthy_suffix: usize,
}

impl All {
    pub fn new() -> Self {
        Self {
            ring: VecDeque::new(),
            truthy_suffix: 0,
        }
    }
}

impl Default for All {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator for All {
    type Input = bool;
    type Output = bool;

    fn add_new(&mut self, value: bool) -> Result<()> {
        self.ring.push_back(value);
        if value {
            self.truthy_suffix += 1;
        } else {
            self.truthy_suffix = 0;
        }
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        if let Some(old) = self.ring.pop_front() {
            if old && self.truthy_suffix > 0 {
                self.truthy_suffix -= 1;
            }
        }
        Ok(())
    }

    fn current_value(&mut self) -> Result<bool> {
        Ok(!self.ring.is_empty() && self.truthy_suffix == self.ring.len())
    }

    fn current_count(&self) -> usize {
        self.ring.len()
    }
}

/// Whether the window is currently monotone nondecreasing, nonincreasing,
/// or both. Constant runs count as monotonic in both directions — the
/// source was ambiguous here (spec's open question), resolved in favour
/// of the more permissive reading.
pub struct Monotonic<T> {
    ring: VecDeque<T>,
    // Length of the nondecreasing/nonincreasing streak ending at the back
    // of the window. `add_new` extends or resets it against the previous
    // back element; `remove_old` only needs to know whether the evicted
    // front element was itself part of that streak (streak length equalled
    // the pre-eviction window length) to shrink it by one — never a rescan.
    nondecreasing_run: usize,
    nonincreasing_run: usize,
}

impl<T: PartialOrd + Clone> Monotonic<T> {
    pub fn new() -> Self {
        Self {
            ring: VecDeque::new(),
            nondecreasing_run: 0,
            nonincreasing_run: 0,
        }
    }
}

impl<T: PartialOrd + Clone> Default for Monotonic<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialOrd + Clone> Aggregator for Monotonic<T> {
    type Input = T;
    type Output = bool;

    fn add_new(&mut self, value: T) -> Result<()> {
        if let Some(last) = self.ring.back() {
            self.nondecreasing_run = if *last <= value { self.nondecreasing_run + 1 } else { 1 };
            self.nonincreasing_run = if *last >= value { self.nonincreasing_run + 1 } else { 1 };
        } else {
            self.nondecreasing_run = 1;
            self.nonincreasing_run = 1;
        }
        self.ring.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        let n = self.ring.len();
        self.ring.pop_front();
        // The streak only shrinks if it spanned the whole pre-eviction
        // window, i.e. the evicted element was its first member.
        if self.nondecreasing_run == n {
            self.nondecreasing_run = n - 1;
        }
        if self.nonincreasing_run == n {
            self.nonincreasing_run = n - 1;
        }
        Ok(())
    }

    fn current_value(&mut self) -> Result<bool> {
        let n = self.ring.len();
        Ok(self.nondecreasing_run == n || self.nonincreasing_run == n)
    }

    fn current_count(&self) -> usize {
        self.ring.len()
    }
}

/// True when the window, read left to right, equals `target` exactly.
/// Compares position by position only once the window is the same length
/// as `target`.
pub struct Match<T> {
    ring: VecDeque<T>,
    target: Vec<T>,
}

impl<T: PartialEq + Clone> Match<T> {
    pub fn new(target: Vec<T>) -> Self {
        Self {
            ring: VecDeque::new(),
            target,
        }
    }
}

impl<T: PartialEq + Clone> Aggregator for Match<T> {
    type Input = T;
    type Output = bool;

    fn add_new(&mut self, value: T) -> Result<()> {
        self.ring.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        self.ring.pop_front();
        Ok(())
    }

    fn current_value(&mut self) -> Result<bool> {
        if self.ring.len() != self.target.len() {
            return Ok(false);
        }
        Ok(self.ring.iter().eq(self.target.iter()))
    }

    fn current_count(&self) -> usize {
        self.ring.len()
    }
}
