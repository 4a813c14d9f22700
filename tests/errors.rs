//! Exercises the error taxonomy of spec.md §7 through the public API.

use std::collections::HashMap;

use rolling_aggregates::aggr::{Entropy, Var};
use rolling_aggregates::{IndexedRolling, Rolling, RollingError, WindowSpec};

#[test]
fn window_type_error_on_entropy_with_variable_window() {
    let input = [1, 2, 3];
    let result = Rolling::new(input.into_iter(), WindowSpec::variable(2), Entropy::<i32>::new());
    assert!(matches!(result, Err(RollingError::WindowType { .. })));
}

#[test]
fn insufficient_data_error_before_ddof_plus_one_elements() {
    let input = [1.0];
    let mut rolling =
        Rolling::new(input.into_iter(), WindowSpec::fixed(1), Var::<f64>::new().with_ddof(1)).unwrap();
    assert!(matches!(
        rolling.next(),
        Some(Err(RollingError::InsufficientData { .. }))
    ));
}

#[test]
fn index_order_error_on_non_monotone_indices() {
    use rolling_aggregates::aggr::Sum;
    let input = vec![(0, 1i64), (2, 2), (1, 3)];
    let mut rolling = IndexedRolling::new(input.into_iter(), 3, Sum::new()).unwrap();
    assert_eq!(rolling.next(), Some(Ok(1)));
    assert_eq!(rolling.next(), Some(Ok(3)));
    assert!(matches!(
        rolling.next(),
        Some(Err(RollingError::IndexOrder { .. }))
    ));
}

#[test]
fn domain_error_on_zero_reference_probability() {
    let mut reference = HashMap::new();
    reference.insert(1, 0.5);
    reference.insert(2, 0.5);
    // value 3 is observed but absent from the reference distribution.
    let input = [1, 2, 3];
    let result = Rolling::new(
        input.into_iter(),
        WindowSpec::fixed(3),
        Entropy::new().with_reference(reference),
    )
    .unwrap()
    .collect::<Vec<_>>();
    assert!(result
        .iter()
        .any(|r| matches!(r, Err(RollingError::Domain(_)))));
}

#[test]
fn stream_mismatch_error_on_unequal_pairwise_streams() {
    use rolling_aggregates::aggr::{zip_checked, ApplyPairwise};

    let a = vec![1, 2, 3];
    let b = vec![10, 20];
    let input = zip_checked(a.into_iter(), b.into_iter());
    let mut rolling = Rolling::new(
        input,
        WindowSpec::fixed(2),
        ApplyPairwise::new(|wa: &[i32], wb: &[i32]| (wa.to_vec(), wb.to_vec())),
    )
    .unwrap();
    assert_eq!(rolling.next(), Some(Ok((vec![1, 2], vec![10, 20]))));
    assert!(matches!(
        rolling.next(),
        Some(Err(RollingError::StreamMismatch { .. }))
    ));
}
