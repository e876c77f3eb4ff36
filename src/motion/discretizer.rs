//! Regular time grid over a motion's duration.
//!
//! ```text
//! t(0)------t(1)------t(2)------...------t(N)---|---t(N+1) = T
//! ```
//!
//! Nodes are spaced by the fixed step; the first node is exactly 0 and the
//! last exactly T. When T is not a multiple of the step, one extra node at T
//! closes the grid with a shorter final gap.

use libm::{fabs, floor, fmax, round};

use crate::config::units::TimeStep;

/// Relative tolerance for treating the duration as a multiple of the step.
pub const MULTIPLE_TOLERANCE: f64 = 1e-9;

/// Iterator over the discretization nodes of a motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discretizer {
    total_time: f64,
    step: f64,
    nodes: usize,
    next: usize,
}

impl Discretizer {
    /// Create the grid for a duration and step.
    ///
    /// `total_time` must be finite and ≥ 0; anything else is treated as a
    /// zero-length motion and yields the single node `0.0`.
    ///
    /// The node count saturates at `usize::MAX`. A capped grid still starts
    /// at 0 and ends at `total_time`, with a longer final gap.
    pub fn new(total_time: f64, step: TimeStep) -> Self {
        let total_time = if total_time.is_finite() && total_time > 0.0 {
            total_time
        } else {
            0.0
        };
        let step = step.seconds();

        let ratio = total_time / step;
        let nearest = round(ratio);
        // A positive duration always keeps a node at T distinct from 0
        let exact = (total_time == 0.0 || nearest >= 1.0)
            && fabs(ratio - nearest) <= MULTIPLE_TOLERANCE * fmax(ratio, 1.0);

        // Float to usize casts saturate; the count is capped at usize::MAX
        let nodes = if exact {
            (nearest as usize).saturating_add(1)
        } else {
            (floor(ratio) as usize).saturating_add(2)
        };

        Self {
            total_time,
            step,
            nodes,
            next: 0,
        }
    }

    /// Total duration covered by the grid.
    #[inline]
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Fixed spacing of the regular nodes.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Total number of nodes, independent of iteration progress.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Time of node `index`, or `None` past the end.
    pub fn node(&self, index: usize) -> Option<f64> {
        if index >= self.nodes {
            None
        } else if index == 0 {
            Some(0.0)
        } else if index == self.nodes - 1 {
            Some(self.total_time)
        } else {
            Some(index as f64 * self.step)
        }
    }
}

impl Iterator for Discretizer {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let t = self.node(self.next)?;
        self.next += 1;
        Some(t)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.nodes.saturating_sub(self.next);
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<f64> {
        self.next = self.next.saturating_add(n);
        self.next()
    }
}

impl ExactSizeIterator for Discretizer {}

impl core::iter::FusedIterator for Discretizer {}
