//! Piecewise quintic spline representation.
//!
//! Each phase segment carries one quintic per axis in segment-local time:
//!
//! ```text
//! p(τ) = a·τ⁵ + b·τ⁴ + c·τ³ + d·τ² + e·τ + f
//! ```
//!
//! Only `a..d` are free. `e` and `f` come from the initial state for the
//! first segment and from the end state of the previous segment otherwise,
//! so position and velocity are continuous by construction.

use heapless::Vec;
use libm::fabs;

use crate::config::units::TimeStep;
use crate::error::{MotionError, PhaseError, Result};
use crate::phase::{PhaseInfo, PhaseSequence, PhaseTimeline, MAX_PHASES};

use super::com_motion::{
    check_coefficients, to_coefficients, ComMotion, Coefficients, MAX_COEFFICIENTS,
};
use super::state::{AxisState, ComState, Vec2};

/// Free coefficients per axis and segment (`a`, `b`, `c`, `d`).
pub const SPLINE_COEFF_PER_AXIS: usize = 4;

/// Free coefficients per segment, x axis first.
pub const SPLINE_COEFF_PER_PHASE: usize = 2 * SPLINE_COEFF_PER_AXIS;

/// Determinants below this fraction of their scale are treated as singular.
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// One quintic, highest order coefficient first.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Quintic {
    coeff: [f64; 6],
}

impl Quintic {
    fn new(free: &[f64], e: f64, f: f64) -> Self {
        Self {
            coeff: [free[0], free[1], free[2], free[3], e, f],
        }
    }

    fn eval(&self, t: f64) -> AxisState {
        let [a, b, c, d, e, f] = self.coeff;
        AxisState {
            pos: ((((a * t + b) * t + c) * t + d) * t + e) * t + f,
            vel: (((5.0 * a * t + 4.0 * b) * t + 3.0 * c) * t + 2.0 * d) * t + e,
            acc: ((20.0 * a * t + 12.0 * b) * t + 6.0 * c) * t + 2.0 * d,
        }
    }
}

/// Center-of-mass motion as a C¹ chain of quintic polynomials.
///
/// Coefficients are laid out per segment as `[ax, bx, cx, dx, ay, by, cy, dy]`.
/// The default coefficients are zero, which keeps the initial velocity for
/// the whole motion.
#[derive(Debug, Clone)]
pub struct SplineComMotion {
    timeline: PhaseTimeline,
    step: TimeStep,
    initial_position: Vec2,
    initial_velocity: Vec2,
    coefficients: Coefficients,
    splines: Vec<[Quintic; 2], MAX_PHASES>,
}

impl SplineComMotion {
    /// Create a spline motion over a timeline, starting in the given state.
    ///
    /// # Errors
    ///
    /// Returns `PhaseError::EmptyTimeline` if the timeline has no segments.
    pub fn new(
        timeline: PhaseTimeline,
        initial_position: Vec2,
        initial_velocity: Vec2,
        step: TimeStep,
    ) -> Result<Self> {
        if timeline.is_empty() {
            return Err(PhaseError::EmptyTimeline.into());
        }

        let required = timeline.len() * SPLINE_COEFF_PER_PHASE;
        let mut coefficients = Coefficients::new();
        coefficients.resize(required, 0.0).map_err(|_| PhaseError::TooManyCoefficients {
            required,
            max: MAX_COEFFICIENTS,
        })?;

        let mut motion = Self {
            timeline,
            step,
            initial_position,
            initial_velocity,
            coefficients,
            splines: Vec::new(),
        };
        motion.rebuild();

        debug!(
            "spline motion: {} phases, {} free coefficients, {} s",
            motion.timeline.len(),
            required,
            motion.timeline.total_time()
        );
        Ok(motion)
    }

    /// The phase timeline this motion is built on.
    #[inline]
    pub fn timeline(&self) -> &PhaseTimeline {
        &self.timeline
    }

    /// Position at t = 0.
    #[inline]
    pub fn initial_position(&self) -> Vec2 {
        self.initial_position
    }

    /// Velocity at t = 0.
    #[inline]
    pub fn initial_velocity(&self) -> Vec2 {
        self.initial_velocity
    }

    /// Recompute the polynomials from the free coefficients.
    fn rebuild(&mut self) {
        let mut pos = self.initial_position.axes();
        let mut vel = self.initial_velocity.axes();

        self.splines.clear();
        for (k, segment) in self.timeline.segments().iter().enumerate() {
            let free = &self.coefficients[k * SPLINE_COEFF_PER_PHASE..(k + 1) * SPLINE_COEFF_PER_PHASE];
            let mut pair = [Quintic::default(); 2];
            for axis in 0..2 {
                let offset = axis * SPLINE_COEFF_PER_AXIS;
                let quintic = Quintic::new(&free[offset..offset + SPLINE_COEFF_PER_AXIS], vel[axis], pos[axis]);
                let end = quintic.eval(segment.duration());
                pos[axis] = end.pos;
                vel[axis] = end.vel;
                pair[axis] = quintic;
            }
            // One spline pair per segment, both bounded by MAX_PHASES
            let _ = self.splines.push(pair);
        }
    }
}

impl ComMotion for SplineComMotion {
    fn com(&self, t_global: f64) -> Result<ComState> {
        let index = self.timeline.segment_index_at(t_global)?;
        let local = self.timeline.segments()[index].local_time(t_global);
        let [x, y] = self.splines[index];
        Ok(ComState::from_axes(x.eval(local), y.eval(local)))
    }

    fn set_coefficients(&mut self, coeff: &[f64]) -> Result<()> {
        check_coefficients(self.total_free_coeff(), coeff)?;
        self.coefficients = to_coefficients(coeff)?;
        self.rebuild();
        trace!("spline coefficients updated ({})", coeff.len());
        Ok(())
    }

    fn total_free_coeff(&self) -> usize {
        self.timeline.len() * SPLINE_COEFF_PER_PHASE
    }

    fn coefficients(&self) -> Coefficients {
        self.coefficients.clone()
    }

    fn total_time(&self) -> f64 {
        self.timeline.total_time()
    }

    fn current_phase(&self, t_global: f64) -> Result<PhaseInfo> {
        self.timeline.phase_at(t_global)
    }

    fn phases(&self) -> PhaseSequence {
        self.timeline.phases()
    }

    /// Solve the last segment's `c` and `d` per axis so it ends in the
    /// initial position and velocity; all other coefficients are kept.
    fn set_end_at_start(&mut self) -> Result<()> {
        let last = self.timeline.len() - 1;
        let t = self.timeline.segments()[last].duration();
        let (t2, t3) = (t * t, t * t * t);
        let (t4, t5) = (t2 * t2, t2 * t3);

        // | t³   t² | |c|   |pos residual|
        // | 3t²  2t | |d| = |vel residual|
        let det = t3 * 2.0 * t - t2 * 3.0 * t2;
        if !(fabs(det) > SINGULAR_TOLERANCE * t4) {
            warn!("end-at-start: singular last segment, det {}", det);
            return Err(MotionError::UnderivableBoundary.into());
        }

        let targets = [
            (self.initial_position.x, self.initial_velocity.x),
            (self.initial_position.y, self.initial_velocity.y),
        ];
        let mut solved = [[0.0; 2]; 2];
        for (axis, (pos0, vel0)) in targets.into_iter().enumerate() {
            let [a, b, _, _, e, f] = self.splines[last][axis].coeff;
            let r_pos = pos0 - (a * t5 + b * t4 + e * t + f);
            let r_vel = vel0 - (5.0 * a * t4 + 4.0 * b * t3 + e);

            let c = (r_pos * 2.0 * t - t2 * r_vel) / det;
            let d = (t3 * r_vel - 3.0 * t2 * r_pos) / det;
            if !(c.is_finite() && d.is_finite()) {
                return Err(MotionError::UnderivableBoundary.into());
            }
            solved[axis] = [c, d];
        }

        let base = last * SPLINE_COEFF_PER_PHASE;
        for (axis, [c, d]) in solved.into_iter().enumerate() {
            let offset = base + axis * SPLINE_COEFF_PER_AXIS;
            self.coefficients[offset + 2] = c;
            self.coefficients[offset + 3] = d;
        }
        self.rebuild();

        debug!("end-at-start: solved last segment over {} s", t);
        Ok(())
    }

    fn discretization_step(&self) -> TimeStep {
        self.step
    }
}
