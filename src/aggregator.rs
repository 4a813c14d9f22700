//! The uniform aggregator contract (spec §4.2, §9 "dynamic dispatch").
//!
//! Every operation in this crate (`Sum`, `Min`, `Median`, `Mode`, ...) is a
//! distinct type implementing this trait rather than a variant of one big
//! enum; the window driver in [`crate::driver`] is polymorphic over the
//! trait, not over the concrete aggregator.

use crate::error::Result;
use crate::window::WindowKind;

/// Capability set every rolling aggregator exposes to the window driver:
/// append a value, evict the oldest value, and read the current reduction.
pub trait Aggregator {
    /// The type of value this aggregator consumes.
    type Input;
    /// The type of value this aggregator produces.
    type Output;

    /// Incorporate a newly arrived value into the window.
    ///
    /// Implementations may return [`crate::error::RollingError::Type`] if
    /// `value` is incompatible with the operation (e.g. non-numeric input to
    /// a moment aggregator).
    fn add_new(&mut self, value: Self::Input) -> Result<()>;

    /// Evict the oldest value currently retained in the window.
    ///
    /// # Errors
    /// Returns [`crate::error::RollingError::EmptyWindow`] if the window
    /// holds no elements. Driver implementations never call this in that
    /// state; a caller hitting it directly has violated the contract.
    fn remove_old(&mut self) -> Result<()>;

    /// The reduction of the window in its current state.
    ///
    /// Takes `&mut self` because a handful of aggregators (e.g. [`MinHeap`](crate::aggr::MinHeap))
    /// perform lazy deletion at query time rather than eagerly on eviction.
    fn current_value(&mut self) -> Result<Self::Output>;

    /// The number of elements currently retained (`_i` in spec terms).
    fn current_count(&self) -> usize;

    /// Which window kinds this operation supports. Most operations accept
    /// all three; a handful (e.g. `Entropy`) are fixed-window only.
    fn allowed_window_kinds() -> &'static [WindowKind]
    where
        Self: Sized,
    {
        &[WindowKind::Fixed, WindowKind::Variable, WindowKind::Indexed]
    }
}
