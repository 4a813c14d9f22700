//! A library of incremental rolling-window aggregators over lazy input
//! streams: given a window specification and a source of values, each
//! aggregator yields the reduction of every window position — sum, min,
//! max, median, mode, variance, entropy, a polynomial rolling hash, and
//! more — at O(1) or O(log k) cost per step, where k is the window size.
//!
//! # Shape of the API
//!
//! Three pieces compose to drive any aggregator:
//!
//! - A [`WindowSpec`] describes how the window grows and shrinks
//!   ([`WindowKind::Fixed`], [`WindowKind::Variable`] or
//!   [`WindowKind::Indexed`]).
//! - An [`Aggregator`] implementation (e.g. [`aggr::Sum`], [`aggr::Median`],
//!   [`aggr::Mode`]) holds the operation-specific incremental state.
//! - A driver — [`Rolling`] for fixed/variable windows, [`IndexedRolling`]
//!   for indexed ones — pulls from the input iterator, feeds the
//!   aggregator, and yields `Result<Output, RollingError>` at every step.
//!
//! ```
//! use rolling_aggregates::{Rolling, WindowSpec, aggr::Max};
//!
//! let input = [3, 1, 4, 1, 5, 9, 2];
//! let maxima: Vec<i32> = Rolling::new(input.into_iter(), WindowSpec::fixed(5), Max::new())
//!     .unwrap()
//!     .map(Result::unwrap)
//!     .collect();
//! assert_eq!(maxima, vec![5, 9, 9]);
//! ```
//!
//! Both drivers implement [`Iterator`], so `extend` aside, nothing about
//! this crate's pull model is special: compose it with adapters, `collect`
//! it, or drive it one `next()` at a time.

pub mod aggr;
mod aggregator;
mod driver;
mod error;
mod skiplist;
mod window;

pub use aggregator::Aggregator;
pub use driver::{IndexedRolling, Rolling};
pub use error::{Result, RollingError};
pub use window::{WindowKind, WindowSpec};
