//! Phase module for com-motion.
//!
//! Provides phase labels and the timeline that partitions a motion into
//! stance, step and flight segments.

mod info;
mod timeline;

pub use info::{PhaseInfo, PhaseType};
pub use timeline::{dedup_phases, PhaseSegment, PhaseSequence, PhaseTimeline, MAX_PHASES};
