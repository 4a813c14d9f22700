//! Property-style tests for the universal properties enumerated in
//! spec.md §8: equivalence to naive recomputation, the length law, the
//! extend law, and the eviction invariant. Run against `Sum` and `Min`
//! as representative aggregators — one from the moment family, one from
//! the monotonic-deque family.

use proptest::prelude::*;
use rolling_aggregates::aggr::{Min, Sum};
use rolling_aggregates::{Rolling, WindowSpec};

fn naive_sum_windows(input: &[i64], k: usize) -> Vec<i64> {
    input.windows(k).map(|w| w.iter().sum()).collect()
}

proptest! {
    #[test]
    fn sum_matches_naive_recomputation(
        input in prop::collection::vec(-1000i64..1000, 0..40),
        k in 1usize..10,
    ) {
        let rolled: Vec<i64> = match Rolling::new(input.clone().into_iter(), WindowSpec::fixed(k), Sum::new()) {
            Ok(rolling) => rolling.map(|r| r.unwrap()).collect(),
            Err(_) => vec![],
        };
        let naive = if input.len() >= k { naive_sum_windows(&input, k) } else { vec![] };
        prop_assert_eq!(rolled, naive);
    }

    #[test]
    fn min_matches_naive_recomputation(
        input in prop::collection::vec(-1000i64..1000, 1..40),
        k in 1usize..10,
    ) {
        let rolled: Vec<i64> = Rolling::new(input.clone().into_iter(), WindowSpec::fixed(k), Min::new())
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        let naive: Vec<i64> = input
            .windows(k)
            .map(|w| *w.iter().min().unwrap())
            .collect();
        prop_assert_eq!(rolled, naive);
    }

    /// Fixed: output length = max(0, n - k + 1). Variable: n + k - 1 if n >= 1, else 0.
    #[test]
    fn length_law_holds(
        input in prop::collection::vec(-1000i64..1000, 0..40),
        k in 1usize..10,
    ) {
        let n = input.len();

        let fixed_len = Rolling::new(input.clone().into_iter(), WindowSpec::fixed(k), Sum::new())
            .unwrap()
            .count();
        let expected_fixed = if n >= k { n - k + 1 } else { 0 };
        prop_assert_eq!(fixed_len, expected_fixed);

        let variable_len = Rolling::new(input.into_iter(), WindowSpec::variable(k), Sum::new())
            .unwrap()
            .count();
        let expected_variable = if n >= 1 { n + k - 1 } else { 0 };
        prop_assert_eq!(variable_len, expected_variable);
    }

    /// Agg(a ++ b) == Agg(a).extend(b) for any split point.
    #[test]
    fn extend_law_holds(
        a in prop::collection::vec(-1000i64..1000, 0..20),
        b in prop::collection::vec(-1000i64..1000, 0..20),
        k in 1usize..8,
    ) {
        let mut whole = a.clone();
        whole.extend(b.clone());
        let direct: Vec<i64> = Rolling::new(whole.into_iter(), WindowSpec::fixed(k), Sum::new())
            .unwrap()
            .map(|r| r.unwrap())
            .collect();

        let mut rolling = Rolling::new(a.into_iter(), WindowSpec::fixed(k), Sum::new()).unwrap();
        let mut extended: Vec<i64> = (&mut rolling).map(|r| r.unwrap()).collect();
        rolling.extend(b);
        extended.extend(rolling.map(|r| r.unwrap()));

        prop_assert_eq!(direct, extended);
    }

    /// After every step, the window never holds more than `size` elements.
    #[test]
    fn eviction_invariant_holds(
        input in prop::collection::vec(-1000i64..1000, 0..40),
        k in 1usize..10,
    ) {
        let mut rolling = Rolling::new(input.into_iter(), WindowSpec::fixed(k), Sum::new()).unwrap();
        while rolling.next().is_some() {
            prop_assert!(rolling.current_count() <= k);
        }
    }
}
