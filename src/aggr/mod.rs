//! Concrete aggregator implementations, one module per component share in
//! the system overview: monotonic-deque extrema, a lazy-deletion heap,
//! Welford-style moments, an indexable-skiplist median, counting
//! aggregators, boolean/structural streak counters, a polynomial hash, a
//! Jaccard-similarity tracker, and the two generic `Apply` variants.

mod apply;
mod boolean;
mod counting;
mod extrema;
mod hash;
mod heap;
mod jaccard;
mod median;
mod moments;

pub use apply::{zip_checked, Apply, ApplyPairwise};
pub use boolean::{All, Any, Match, Monotonic};
pub use counting::{Entropy, Mode, ModeResult, Nunique};
pub use extrema::{Max, Min};
pub use hash::PolynomialHash;
pub use heap::MinHeap;
pub use jaccard::JaccardIndex;
pub use median::Median;
pub use moments::{Kurtosis, Mean, Product, Skew, Std, Sum, Var};
