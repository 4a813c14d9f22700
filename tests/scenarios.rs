//! The six concrete scenarios enumerated in spec.md §8, run end-to-end
//! through the public API rather than against a single aggregator module.

use rolling_aggregates::aggr::{Apply, Max, Sum};
use rolling_aggregates::{IndexedRolling, Rolling, WindowSpec};

#[test]
fn scenario_1_max_fixed() {
    let input = [3, 1, 4, 1, 5, 9, 2];
    let out: Vec<i32> = Rolling::new(input.into_iter(), WindowSpec::fixed(5), Max::new())
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(out, vec![5, 9, 9]);
}

#[test]
fn scenario_2_sum_fixed() {
    let input = [1, 5, 2, 0, 3];
    let out: Vec<i32> = Rolling::new(input.into_iter(), WindowSpec::fixed(3), Sum::new())
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(out, vec![8, 7, 5]);
}

#[test]
fn scenario_3_all_fixed() {
    use rolling_aggregates::aggr::All;
    let input = [true, true, false, true, true];
    let out: Vec<bool> = Rolling::new(input.into_iter(), WindowSpec::fixed(3), All::new())
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(out, vec![false, false, false]);
}

#[test]
fn scenario_4_apply_variable() {
    let input = [3, 1, 4, 1, 5, 9, 2];
    let out: Vec<Vec<i32>> = Rolling::new(
        input.into_iter(),
        WindowSpec::variable(3),
        Apply::new(|w: &[i32]| w.to_vec()),
    )
    .unwrap()
    .map(Result::unwrap)
    .collect();
    let expected: Vec<Vec<i32>> = vec![
        vec![3],
        vec![3, 1],
        vec![3, 1, 4],
        vec![1, 4, 1],
        vec![4, 1, 5],
        vec![1, 5, 9],
        vec![5, 9, 2],
        vec![9, 2],
        vec![2],
    ];
    assert_eq!(out, expected);
}

#[test]
fn scenario_5_apply_indexed() {
    let indices = [0, 1, 2, 6, 7, 11, 15];
    let values = [3, 1, 4, 1, 5, 9, 2];
    let input = indices.into_iter().zip(values);
    let out: Vec<Vec<i32>> = IndexedRolling::new(input, 3, Apply::new(|w: &[i32]| w.to_vec()))
        .unwrap()
        .map(Result::unwrap)
        .collect();
    let expected: Vec<Vec<i32>> = vec![
        vec![3],
        vec![3, 1],
        vec![3, 1, 4],
        vec![1],
        vec![1, 5],
        vec![9],
        vec![2],
    ];
    assert_eq!(out, expected);
}

#[test]
fn scenario_6_median_fixed() {
    use rolling_aggregates::aggr::Median;
    let input = [1.0, 3.0, 2.0, 5.0, 4.0];
    let out: Vec<f64> = Rolling::new(input.into_iter(), WindowSpec::fixed(3), Median::new())
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(out, vec![2.0, 3.0, 4.0]);
}
