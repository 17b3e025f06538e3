//! Edge keys and timestamps.

use std::fmt;

/// Timestamp type (seconds since epoch or arbitrary units).
///
/// Signed so that `current_time - window_size` can go below zero early in a
/// stream, and so that negative input can be recognised and ignored.
pub type Timestamp = i64;

/// An undirected edge between two distinct nodes, stored as `(min, max)`.
///
/// The ordering makes `EdgeKey::new(a, b) == EdgeKey::new(b, a)`, so one
/// undirected pair maps to exactly one priority-queue key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey<N> {
    lo: N,
    hi: N,
}

impl<N: Ord> EdgeKey<N> {
    /// Canonical key for the pair `{a, b}`.
    ///
    /// Returns `None` for a self-loop.
    pub fn new(a: N, b: N) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Some(Self { lo: b, hi: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Smaller endpoint.
    pub fn lo(&self) -> &N {
        &self.lo
    }

    /// Larger endpoint.
    pub fn hi(&self) -> &N {
        &self.hi
    }

    /// Both endpoints, smaller first.
    pub fn endpoints(&self) -> (&N, &N) {
        (&self.lo, &self.hi)
    }

    /// Consume the key, returning `(min, max)`.
    pub fn into_pair(self) -> (N, N) {
        (self.lo, self.hi)
    }
}

impl<N: fmt::Debug> fmt::Display for EdgeKey<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} -> {:?}", self.lo, self.hi)
    }
}
