//! Counting aggregators: `Nunique`, `Mode`, `Entropy` (spec §4.7) — all built
//! on a `value -> count` multiset, with `Mode` adding the bidirectional
//! `count -> {value}` index described in the GLOSSARY.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::aggregator::Aggregator;
use crate::error::{Result, RollingError};
use crate::window::WindowKind;

/// Count of distinct values currently retained in the window. Keeps a ring
/// buffer of raw values (insertion order) so it can evict by content.
pub struct Nunique<T> {
    counts: HashMap<T, usize>,
    ring: std::collections::VecDeque<T>,
}

impl<T: Eq + Hash + Clone> Nunique<T> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            ring: std::collections::VecDeque::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> Default for Nunique<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> Aggregator for Nunique<T> {
    type Input = T;
    type Output = usize;

    fn add_new(&mut self, value: T) -> Result<()> {
        *self.counts.entry(value.clone()).or_insert(0) += 1;
        self.ring.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        let old = self.ring.pop_front().ok_or(RollingError::EmptyWindow)?;
        if let Some(c) = self.counts.get_mut(&old) {
            *c -= 1;
            if *c == 0 {
                self.counts.remove(&old);
            }
        }
        Ok(())
    }

    fn current_value(&mut self) -> Result<usize> {
        Ok(self.counts.len())
    }

    fn current_count(&self) -> usize {
        self.ring.len()
    }
}

/// The result of [`Mode::current_value`]: the set of values currently tied
/// for the highest count, plus that count when `return_count` was set.
#[derive(Debug, Clone)]
pub struct ModeResult<T> {
    pub values: HashSet<T>,
    pub count: Option<usize>,
}

// `HashSet<T>`'s own `PartialEq`/`Eq` impls require `T: Eq + Hash`, which is
// stricter than what `#[derive(PartialEq)]` would assume on this struct.
impl<T: Eq + Hash> PartialEq for ModeResult<T> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.count == other.count
    }
}

impl<T: Eq + Hash> Eq for ModeResult<T> {}

/// Rolling mode via a bidirectional `value <-> count` index (GLOSSARY): a
/// `value -> count` map and a `count -> {value}` map, kept in lockstep so
/// that the current maximum-count bucket is always known in O(1).
pub struct Mode<T> {
    value_counts: HashMap<T, usize>,
    count_buckets: HashMap<usize, HashSet<T>>,
    max_count: usize,
    ring: std::collections::VecDeque<T>,
    return_count: bool,
}

impl<T: Eq + Hash + Clone> Mode<T> {
    pub fn new() -> Self {
        Self {
            value_counts: HashMap::new(),
            count_buckets: HashMap::new(),
            max_count: 0,
            ring: std::collections::VecDeque::new(),
            return_count: false,
        }
    }

    /// Include the winning count alongside the value set (default false).
    pub fn with_return_count(mut self, return_count: bool) -> Self {
        self.return_count = return_count;
        self
    }

    fn promote(&mut self, value: &T, old_count: usize) {
        if old_count > 0 {
            if let Some(bucket) = self.count_buckets.get_mut(&old_count) {
                bucket.remove(value);
                if bucket.is_empty() {
                    self.count_buckets.remove(&old_count);
                }
            }
        }
        self.count_buckets
            .entry(old_count + 1)
            .or_default()
            .insert(value.clone());
        if old_count + 1 > self.max_count {
            self.max_count = old_count + 1;
        }
    }

    fn demote(&mut self, value: &T, old_count: usize) {
        if let Some(bucket) = self.count_buckets.get_mut(&old_count) {
            bucket.remove(value);
            if bucket.is_empty() {
                self.count_buckets.remove(&old_count);
            }
        }
        if old_count > 1 {
            self.count_buckets
                .entry(old_count - 1)
                .or_default()
                .insert(value.clone());
        }
        // Bucket `old_count - 1` (if any) is populated by now, so a rescan
        // here sees the post-demotion state rather than a transient gap.
        if old_count == self.max_count && !self.count_buckets.contains_key(&self.max_count) {
            self.max_count = self.count_buckets.keys().copied().max().unwrap_or(0);
        }
    }
}

impl<T: Eq + Hash + Clone> Default for Mode<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> Aggregator for Mode<T> {
    type Input = T;
    type Output = ModeResult<T>;

    fn add_new(&mut self, value: T) -> Result<()> {
        let old_count = *self.value_counts.get(&value).unwrap_or(&0);
        self.promote(&value, old_count);
        self.value_counts.insert(value.clone(), old_count + 1);
        self.ring.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        let old = self.ring.pop_front().ok_or(RollingError::EmptyWindow)?;
        let old_count = *self.value_counts.get(&old).unwrap_or(&0);
        if old_count == 0 {
            return Err(RollingError::EmptyWindow);
        }
        self.demote(&old, old_count);
        if old_count == 1 {
            self.value_counts.remove(&old);
        } else {
            self.value_counts.insert(old, old_count - 1);
        }
        Ok(())
    }

    fn current_value(&mut self) -> Result<ModeResult<T>> {
        let values = self
            .count_buckets
            .get(&self.max_count)
            .cloned()
            .unwrap_or_default();
        Ok(ModeResult {
            values,
            count: if self.return_count {
                Some(self.max_count)
            } else {
                None
            },
        })
    }

    fn current_count(&self) -> usize {
        self.ring.len()
    }
}

/// Shannon entropy (spec §4.7), fixed-window only. Maintains the running
/// sum `S = sum(count_i * ln(count_i))` so that `H = ln(k) - S/k` is O(1)
/// to recompute after every mutation; the result is converted to the
/// requested logarithm base (default e) at read time.
pub struct Entropy<T> {
    counts: HashMap<T, usize>,
    ring: std::collections::VecDeque<T>,
    s: f64,
    t: f64,
    base: f64,
    reference: Option<HashMap<T, f64>>,
}

impl<T: Eq + Hash + Clone> Entropy<T> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            ring: std::collections::VecDeque::new(),
            s: 0.0,
            t: 0.0,
            base: std::f64::consts::E,
            reference: None,
        }
    }

    /// Set the logarithm base (must be positive and not 1; default e).
    pub fn with_base(mut self, base: f64) -> Self {
        assert!(base > 0.0 && base != 1.0, "entropy base must be positive and != 1, got {base}");
        self.base = base;
        self
    }

    /// Compute relative entropy against a fixed reference distribution
    /// instead of plain Shannon entropy.
    pub fn with_reference(mut self, reference: HashMap<T, f64>) -> Self {
        self.reference = Some(reference);
        self
    }

    fn count_term(c: usize) -> f64 {
        if c == 0 {
            0.0
        } else {
            (c as f64) * (c as f64).ln()
        }
    }
}

impl<T: Eq + Hash + Clone> Default for Entropy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> Aggregator for Entropy<T> {
    type Input = T;
    type Output = f64;

    fn add_new(&mut self, value: T) -> Result<()> {
        if let Some(reference) = &self.reference {
            let prob = reference.get(&value).copied().unwrap_or(0.0);
            if prob <= 0.0 {
                return Err(RollingError::Domain(
                    "reference probability is zero for an observed value".to_string(),
                ));
            }
            self.t += prob.ln();
        }
        let old_count = *self.counts.get(&value).unwrap_or(&0);
        self.s += Self::count_term(old_count + 1) - Self::count_term(old_count);
        self.counts.insert(value.clone(), old_count + 1);
        self.ring.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        let old = self.ring.pop_front().ok_or(RollingError::EmptyWindow)?;
        let old_count = *self.counts.get(&old).unwrap_or(&0);
        if old_count == 0 {
            return Err(RollingError::EmptyWindow);
        }
        self.s += Self::count_term(old_count - 1) - Self::count_term(old_count);
        if let Some(reference) = &self.reference {
            let prob = reference.get(&old).copied().unwrap_or(0.0);
            self.t -= prob.ln();
        }
        if old_count == 1 {
            self.counts.remove(&old);
        } else {
            self.counts.insert(old, old_count - 1);
        }
        Ok(())
    }

    fn current_value(&mut self) -> Result<f64> {
        let k = self.ring.len();
        if k == 0 {
            return Err(RollingError::InsufficientData {
                required: 1,
                available: 0,
            });
        }
        let k = k as f64;
        let nats = if self.reference.is_some() {
            (self.s - self.t - k * k.ln()) / k
        } else {
            k.ln() - self.s / k
        };
        Ok(nats / self.base.ln())
    }

    fn current_count(&self) -> usize {
        self.ring.len()
    }

    fn allowed_window_kinds() -> &'static [WindowKind] {
        &[WindowKind::Fixed]
    }
}
