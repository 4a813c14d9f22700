//! Window specifications: the immutable description of how a rolling
//! aggregator should grow, shrink and evict (spec §3).

/// The kind of window an aggregator is driven under.
///
/// See the crate-level documentation and `spec.md` §3 for the exact
/// semantics of each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowKind {
    /// Emit only full windows; the first output appears once `size` inputs
    /// have arrived.
    Fixed,
    /// Emit growing windows while priming, full windows in steady state,
    /// shrinking windows while draining.
    Variable,
    /// The window contains every element whose index lies within
    /// `(current_index - size, current_index]`.
    Indexed,
}

impl WindowKind {
    pub(crate) const fn name(self) -> &'static str {
        match self {
            WindowKind::Fixed => "fixed",
            WindowKind::Variable => "variable",
            WindowKind::Indexed => "indexed",
        }
    }
}

/// An immutable window specification: how big the window is and how it
/// behaves at the edges of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowSpec {
    size: usize,
    kind: WindowKind,
}

impl WindowSpec {
    /// Build a new window specification. `size` must be strictly positive;
    /// it represents an element count for `Fixed`/`Variable` windows and an
    /// index distance for `Indexed` windows.
    pub fn new(size: usize, kind: WindowKind) -> Self {
        assert!(size > 0, "window size must be positive, got {size}");
        Self { size, kind }
    }

    /// A fixed-size window of `size` elements.
    pub fn fixed(size: usize) -> Self {
        Self::new(size, WindowKind::Fixed)
    }

    /// A variable window that grows to `size`, stays there, then shrinks.
    pub fn variable(size: usize) -> Self {
        Self::new(size, WindowKind::Variable)
    }

    /// An indexed window spanning index distance `size`.
    pub fn indexed(size: usize) -> Self {
        Self::new(size, WindowKind::Indexed)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }
}
