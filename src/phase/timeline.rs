//! Phase timeline: contiguous labeled segments covering the motion.

use heapless::Vec;

use crate::error::{MotionError, PhaseError, Result};

use super::info::{PhaseInfo, PhaseType};

/// Maximum number of segments in a timeline.
pub const MAX_PHASES: usize = 32;

/// Ordered, deduplicated phases of a motion.
pub type PhaseSequence = Vec<PhaseInfo, MAX_PHASES>;

/// One labeled interval `[start, end)` of the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSegment {
    /// Phase label.
    pub info: PhaseInfo,
    /// Global start time in seconds.
    pub start: f64,
    /// Global end time in seconds.
    pub end: f64,
}

impl PhaseSegment {
    /// Segment duration in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Convert a global time to segment-local time.
    #[inline]
    pub fn local_time(&self, t_global: f64) -> f64 {
        t_global - self.start
    }
}

/// Contiguous sequence of phase segments starting at t = 0.
///
/// Ids are derived while pushing: every step or flight phase takes the next
/// step index, every stance phase carries the index of the last step taken.
#[derive(Debug, Clone, Default)]
pub struct PhaseTimeline {
    segments: Vec<PhaseSegment, MAX_PHASES>,
    steps_taken: i32,
}

impl PhaseTimeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            steps_taken: 0,
        }
    }

    /// Build a timeline from `(kind, duration)` pairs.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid duration or when the timeline is full.
    pub fn from_phases<I>(phases: I) -> Result<Self>
    where
        I: IntoIterator<Item = (PhaseType, f64)>,
    {
        let mut timeline = Self::new();
        for (kind, duration) in phases {
            timeline.push(kind, duration)?;
        }
        Ok(timeline)
    }

    /// Append a phase of the given kind and duration.
    ///
    /// # Errors
    ///
    /// Returns `PhaseError::InvalidDuration` unless the duration is finite and
    /// > 0, and `PhaseError::TooManyPhases` when the timeline is full.
    pub fn push(&mut self, kind: PhaseType, duration: f64) -> Result<()> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(PhaseError::InvalidDuration(duration).into());
        }
        if self.segments.is_full() {
            return Err(PhaseError::TooManyPhases.into());
        }

        let id = if kind.takes_step() {
            self.steps_taken
        } else {
            self.steps_taken - 1
        };
        let start = self.total_time();
        let segment = PhaseSegment {
            info: PhaseInfo::new(kind, id),
            start,
            end: start + duration,
        };
        self.segments
            .push(segment)
            .map_err(|_| PhaseError::TooManyPhases)?;

        if kind.takes_step() {
            self.steps_taken += 1;
        }
        Ok(())
    }

    /// All segments in time order.
    #[inline]
    pub fn segments(&self) -> &[PhaseSegment] {
        &self.segments
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the timeline has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total duration in seconds (0 when empty).
    #[inline]
    pub fn total_time(&self) -> f64 {
        self.segments.last().map(|s| s.end).unwrap_or(0.0)
    }

    /// Index of the segment active at `t_global`.
    ///
    /// A break time belongs to the segment starting there; the total time
    /// belongs to the last segment.
    ///
    /// # Errors
    ///
    /// `MotionError::OutOfRangeTime` outside `[0, total_time]` (NaN included),
    /// `PhaseError::EmptyTimeline` when there are no segments.
    pub fn segment_index_at(&self, t_global: f64) -> Result<usize> {
        let last = self.segments.len().checked_sub(1).ok_or(PhaseError::EmptyTimeline)?;
        let total = self.total_time();
        if !(t_global >= 0.0 && t_global <= total) {
            return Err(MotionError::OutOfRangeTime { t: t_global, total }.into());
        }

        Ok(self
            .segments
            .iter()
            .position(|s| t_global < s.end)
            .unwrap_or(last))
    }

    /// Segment active at `t_global`.
    pub fn segment_at(&self, t_global: f64) -> Result<&PhaseSegment> {
        let index = self.segment_index_at(t_global)?;
        Ok(&self.segments[index])
    }

    /// Phase label active at `t_global`.
    pub fn phase_at(&self, t_global: f64) -> Result<PhaseInfo> {
        self.segment_at(t_global).map(|s| s.info)
    }

    /// Distinct phases in the order they are visited.
    pub fn phases(&self) -> PhaseSequence {
        dedup_phases(self.segments.iter().map(|s| s.info))
    }
}

/// Keep the first occurrence of every phase, preserving visiting order.
///
/// Phases beyond the sequence capacity are dropped; a timeline never holds
/// more than `MAX_PHASES` segments so this cannot happen for its output.
pub fn dedup_phases<I>(phases: I) -> PhaseSequence
where
    I: IntoIterator<Item = PhaseInfo>,
{
    let mut sequence = PhaseSequence::new();
    for phase in phases {
        if !sequence.contains(&phase) && sequence.push(phase).is_err() {
            break;
        }
    }
    sequence
}
