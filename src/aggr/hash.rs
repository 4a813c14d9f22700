//! Modular polynomial rolling hash (spec §4.9).

use std::collections::VecDeque;

use crate::aggregator::Aggregator;
use crate::error::{Result, RollingError};

/// A commonly-used 61-bit Mersenne prime, large enough to make accidental
/// collisions vanishingly unlikely for moderate window sizes.
const DEFAULT_MODULUS: i64 = 2_305_843_009_213_693_951;
const DEFAULT_BASE: i64 = 256;

/// `H = sum(v_j * b^(k-1-j)) mod m` over the window, maintained
/// incrementally: `H = (H*b + v) mod m` on append, `H = (H - v_old*b^(k-1))
/// mod m` on eviction. Requires `size` up front since `b^(k-1) mod m` is
/// precomputed once rather than re-derived on every eviction.
pub struct PolynomialHash {
    base: i64,
    modulus: i64,
    high_power: i64,
    hash: i64,
    ring: VecDeque<i64>,
}

impl PolynomialHash {
    pub fn new(size: usize) -> Self {
        Self::with_params(size, DEFAULT_BASE, DEFAULT_MODULUS)
    }

    pub fn with_params(size: usize, base: i64, modulus: i64) -> Self {
        assert!(modulus > 0, "modulus must be positive");
        assert!(size > 0, "window size must be positive");
        let mut high_power = 1i64;
        for _ in 0..size.saturating_sub(1) {
            high_power = high_power * base.rem_euclid(modulus) % modulus;
        }
        Self {
            base,
            modulus,
            high_power,
            hash: 0,
            ring: VecDeque::new(),
        }
    }
}

impl Aggregator for PolynomialHash {
    type Input = i64;
    type Output = i64;

    fn add_new(&mut self, value: i64) -> Result<()> {
        if value < 0 || value >= self.modulus {
            return Err(RollingError::Type(format!(
                "value {value} is not coercible to an integer in [0, {})",
                self.modulus
            )));
        }
        self.hash = (self.hash * self.base.rem_euclid(self.modulus) + value) % self.modulus;
        self.ring.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        let old = self.ring.pop_front().ok_or(RollingError::EmptyWindow)?;
        let contribution = old * self.high_power % self.modulus;
        self.hash = ((self.hash - contribution) % self.modulus + self.modulus) % self.modulus;
        Ok(())
    }

    fn current_value(&mut self) -> Result<i64> {
        Ok(self.hash)
    }

    fn current_count(&self) -> usize {
        self.ring.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowSpec;
    use crate::Rolling;

    #[test]
    fn matches_naive_recomputation() {
        let input: Vec<i64> = vec![3, 1, 4, 1, 5, 9, 2, 6];
        let k = 3;
        let base = 31;
        let modulus = 1_000_000_007;
        let rolled: Vec<i64> = Rolling::new(
            input.clone().into_iter(),
            WindowSpec::fixed(k),
            PolynomialHash::with_params(k, base, modulus),
        )
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
        let naive: Vec<i64> = input
            .windows(k)
            .map(|w| {
                let mut h = 0i64;
                for &v in w {
                    h = (h * base + v) % modulus;
                }
                h
            })
            .collect();
        assert_eq!(rolled, naive);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut hasher = PolynomialHash::with_params(2, 10, 97);
        assert!(matches!(hasher.add_new(200), Err(RollingError::Type(_))));
    }
}
