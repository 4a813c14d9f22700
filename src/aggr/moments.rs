//! Moment aggregators: `Sum`, `Product`, `Mean`, `Var`, `Std`, `Skew`,
//! `Kurtosis` (spec §4.5), all maintained by Welford-style running moments
//! that support both incorporation (`add`) and eviction (`remove`) in O(1).

use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use num_traits::Zero;

use crate::aggregator::Aggregator;
use crate::error::{Result, RollingError};

/// Running sum, evicting the oldest value via a ring buffer.
pub struct Sum<T> {
    total: T,
    ring: std::collections::VecDeque<T>,
}

impl<T: Copy + Default + AddAssign + SubAssign> Sum<T> {
    pub fn new() -> Self {
        Self {
            total: T::default(),
            ring: std::collections::VecDeque::new(),
        }
    }
}

impl<T: Copy + Default + AddAssign + SubAssign> Default for Sum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default + AddAssign + SubAssign> Aggregator for Sum<T> {
    type Input = T;
    type Output = T;

    fn add_new(&mut self, value: T) -> Result<()> {
        self.total += value;
        self.ring.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        match self.ring.pop_front() {
            Some(old) => {
                self.total -= old;
                Ok(())
            }
            None => Err(RollingError::EmptyWindow),
        }
    }

    fn current_value(&mut self) -> Result<T> {
        Ok(self.total)
    }

    fn current_count(&self) -> usize {
        self.ring.len()
    }
}

/// Running product. Zeroes are tracked separately so that eviction never
/// requires dividing by zero.
pub struct Product<T> {
    nonzero_product: T,
    zero_count: usize,
    ring: std::collections::VecDeque<T>,
    one: T,
}

impl<T: Copy + Zero + MulAssign + DivAssign + PartialEq> Product<T> {
    pub fn new(one: T) -> Self {
        Self {
            nonzero_product: one,
            zero_count: 0,
            ring: std::collections::VecDeque::new(),
            one,
        }
    }
}

impl<T: Copy + Zero + MulAssign + DivAssign + PartialEq + Default> Aggregator for Product<T> {
    type Input = T;
    type Output = T;

    fn add_new(&mut self, value: T) -> Result<()> {
        if value.is_zero() {
            self.zero_count += 1;
        } else {
            self.nonzero_product *= value;
        }
        self.ring.push_back(value);
        Ok(())
    }

    fn remove_old(&mut self) -> Result<()> {
        match self.ring.pop_front() {
            Some(old) => {
                if old.is_zero() {
                    self.zero_count -= 1;
                } else {
                    self.nonzero_product /= old;
                }
                Ok(())
            }
            None => Err(RollingError::EmptyWindow),
        }
    }

    fn current_value(&mut self) -> Result<T> {
        if self.zero_count > 0 {
            Ok(T::default())
        } else {
            Ok(self.nonzero_product)
        }
    }

    fn current_count(&self) -> usize {
        self.ring.len()
    }
}

/// The shared running-moment accumulator behind `Mean`/`Var`/`Std`/`Skew`/
/// `Kurtosis`: Welford's algorithm generalised to the 2nd through 4th
/// central moments, with an exact inverse used on eviction.
#[derive(Clone, Copy, Default)]
struct Moments {
    n: usize,
    mean: f64,
    m2: f64,
    m3: f64,
    m4: f64,
}

impl Moments {
    fn add(&mut self, x: f64) {
        let n1 = self.n as f64;
        self.n += 1;
        let n = self.n as f64;
        let delta = x - self.mean;
        let delta_n = delta / n;
        let delta_n2 = delta_n * delta_n;
        let term1 = delta * delta_n * n1;
        self.mean += delta_n;
        self.m4 += term1 * delta_n2 * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n2 * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;
    }

    fn remove(&mut self, x: f64) -> Result<()> {
        if self.n == 0 {
            return Err(RollingError::EmptyWindow);
        }
        if self.n == 1 {
            *self = Moments::default();
            return Ok(());
        }
        let n = self.n as f64;
        let delta = n * (x - self.mean) / (n - 1.0);
        let delta_n = delta / n;
        let delta_n2 = delta_n * delta_n;
        let n1 = n - 1.0;
        let term1 = delta * delta_n * n1;

        let mean_new = self.mean - delta_n;
        let m2_new = self.m2 - term1;
        let m3_new = self.m3 - term1 * delta_n * (n - 2.0) + 3.0 * delta_n * m2_new;
        let m4_new = self.m4 - term1 * delta_n2 * (n * n - 3.0 * n + 3.0) - 6.0 * delta_n2 * m2_new
            + 4.0 * delta_n * m3_new;

        self.n -= 1;
        self.mean = mean_new;
        self.m2 = m2_new;
        self.m3 = m3_new;
        self.m4 = m4_new;
        Ok(())
    }
}

/// Every moment aggregator needs to recall the oldest retained value in
/// order to undo its contribution, so each keeps its own ring buffer
/// alongside the shared [`Moments`] accumulator.
macro_rules! moment_aggregator {
    ($name:ident, $output:ty, $extra:ty, $new_extra:expr, $value_fn:expr, $min_n:expr) => {
        pub struct $name<T> {
            moments: Moments,
            ring: std::collections::VecDeque<f64>,
            extra: $extra,
            _marker: std::marker::PhantomData<T>,
        }

        impl<T> $name<T> {
            #[allow(clippy::redundant_closure_call)]
            pub fn new() -> Self {
                Self {
                    moments: Moments::default(),
                    ring: std::collections::VecDeque::new(),
                    extra: $new_extra,
                    _marker: std::marker::PhantomData,
                }
            }
        }

        impl<T> Default for $name<T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T: Copy + Into<f64>> Aggregator for $name<T> {
            type Input = T;
            type Output = $output;

            fn add_new(&mut self, value: T) -> Result<()> {
                let x: f64 = value.into();
                self.moments.add(x);
                self.ring.push_back(x);
                Ok(())
            }

            fn remove_old(&mut self) -> Result<()> {
                match self.ring.pop_front() {
                    Some(x) => self.moments.remove(x),
                    None => Err(RollingError::EmptyWindow),
                }
            }

            fn current_value(&mut self) -> Result<$output> {
                let required = $min_n(&self.extra);
                if self.moments.n < required {
                    return Err(RollingError::InsufficientData {
                        required,
                        available: self.moments.n,
                    });
                }
                Ok($value_fn(&self.moments, &self.extra))
            }

            fn current_count(&self) -> usize {
                self.ring.len()
            }
        }
    };
}

moment_aggregator!(
    Mean,
    f64,
    (),
    (),
    |m: &Moments, _: &()| m.mean,
    |_: &()| 1usize
);

moment_aggregator!(
    Var,
    f64,
    usize,
    0usize,
    |m: &Moments, ddof: &usize| (m.m2 / (m.n - ddof) as f64).max(0.0),
    |ddof: &usize| ddof + 1
);

moment_aggregator!(
    Std,
    f64,
    usize,
    0usize,
    |m: &Moments, ddof: &usize| (m.m2 / (m.n - ddof) as f64).max(0.0).sqrt(),
    |ddof: &usize| ddof + 1
);

moment_aggregator!(
    Skew,
    f64,
    (),
    (),
    |m: &Moments, _: &()| {
        let n = m.n as f64;
        let variance = m.m2 / n;
        (m.m3 / n) / variance.powf(1.5)
    },
    |_: &()| 3usize
);

moment_aggregator!(
    Kurtosis,
    f64,
    (),
    (),
    |m: &Moments, _: &()| {
        let n = m.n as f64;
        let variance = m.m2 / n;
        (m.m4 / n) / (variance * variance) - 3.0
    },
    |_: &()| 4usize
);

impl<T> Var<T> {
    /// Set the degrees-of-freedom correction (default 0).
    pub fn with_ddof(mut self, ddof: usize) -> Self {
        self.extra = ddof;
        self
    }
}

impl<T> Std<T> {
    /// Set the degrees-of-freedom correction (default 0).
    pub fn with_ddof(mut self, ddof: usize) -> Self {
        self.extra = ddof;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowSpec;
    use crate::Rolling;

    #[test]
    fn sum_matches_spec_scenario() {
        let input = [1, 5, 2, 0, 3];
        let out: Vec<i32> = Rolling::new(input.into_iter(), WindowSpec::fixed(3), Sum::new())
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(out, vec![8, 7, 5]);
    }

    #[test]
    fn mean_matches_naive_recomputation() {
        let input: Vec<f64> = vec![4.0, 1.0, 7.0, 2.0, 9.0, 3.0, 6.0];
        let k = 3;
        let rolled: Vec<f64> = Rolling::new(input.clone().into_iter(), WindowSpec::fixed(k), Mean::new())
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        let naive: Vec<f64> = input
            .windows(k)
            .map(|w| w.iter().sum::<f64>() / k as f64)
            .collect();
        for (a, b) in rolled.iter().zip(naive.iter()) {
            assert!((a - b).abs() < 1e-9, "{a} vs {b}");
        }
    }

    #[test]
    fn var_matches_naive_recomputation() {
        let input: Vec<f64> = vec![4.0, 1.0, 7.0, 2.0, 9.0, 3.0, 6.0, 5.0];
        let k = 4;
        let rolled: Vec<f64> =
            Rolling::new(input.clone().into_iter(), WindowSpec::fixed(k), Var::<f64>::new())
                .unwrap()
                .map(|r| r.unwrap())
                .collect();
        let naive: Vec<f64> = input
            .windows(k)
            .map(|w| {
                let mean = w.iter().sum::<f64>() / k as f64;
                w.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / k as f64
            })
            .collect();
        for (a, b) in rolled.iter().zip(naive.iter()) {
            assert!((a - b).abs() < 1e-6, "{a} vs {b}");
        }
    }

    #[test]
    fn var_requires_at_least_ddof_plus_one() {
        let input: Vec<f64> = vec![1.0];
        let mut rolling =
            Rolling::new(input.into_iter(), WindowSpec::fixed(1), Var::<f64>::new().with_ddof(1))
                .unwrap();
        assert!(matches!(
            rolling.next(),
            Some(Err(RollingError::InsufficientData { .. }))
        ));
    }
}
