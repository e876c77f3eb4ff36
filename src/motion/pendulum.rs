//! Linear inverted pendulum representation.
//!
//! During contact phases each axis follows `ẍ = ω²(x − p)` with `ω = √(g/h)`
//! and `p` the center of pressure (CoP) of that phase, which has the closed
//! form
//!
//! ```text
//! x(τ) = x₀·cosh(ωτ) + p·(1 − cosh(ωτ)) + v₀/ω·sinh(ωτ)
//! ```
//!
//! Flight phases carry no horizontal force, so the CoM drifts at constant
//! velocity. The free coefficients are the CoPs of the contact phases.

use heapless::Vec;
use libm::{cosh, fabs, hypot, sinh, sqrt};

use crate::config::units::TimeStep;
use crate::error::{ConfigError, MotionError, PhaseError, Result};
use crate::phase::{PhaseInfo, PhaseSegment, PhaseSequence, PhaseTimeline, MAX_PHASES};

use super::com_motion::{
    check_coefficients, to_coefficients, ComMotion, Coefficients, MAX_COEFFICIENTS,
};
use super::state::{AxisState, ComState, Vec2};

/// Free coefficients per contact phase (CoP x and y).
pub const PENDULUM_COEFF_PER_PHASE: usize = 2;

/// Standard gravity in m/s².
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Determinants below this fraction of their scale are treated as singular.
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Physical parameters of the pendulum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumParams {
    /// Constant CoM height above the ground in meters.
    pub height: f64,
    /// Gravitational acceleration in m/s².
    pub gravity: f64,
}

impl PendulumParams {
    /// Create validated pendulum parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPendulumHeight` or
    /// `ConfigError::InvalidGravity` unless both values are finite and > 0.
    pub fn new(height: f64, gravity: f64) -> Result<Self> {
        if !(height.is_finite() && height > 0.0) {
            return Err(ConfigError::InvalidPendulumHeight(height).into());
        }
        if !(gravity.is_finite() && gravity > 0.0) {
            return Err(ConfigError::InvalidGravity(gravity).into());
        }
        Ok(Self { height, gravity })
    }

    /// Natural frequency `√(g/h)`.
    #[inline]
    pub fn omega(&self) -> f64 {
        sqrt(self.gravity / self.height)
    }
}

/// Affine map of one axis state `[pos, vel]` across a whole segment:
/// `s' = M·s + b·p`.
#[derive(Debug, Clone, Copy)]
struct Transition {
    m: [[f64; 2]; 2],
    b: [f64; 2],
}

impl Transition {
    fn contact(omega: f64, duration: f64) -> Self {
        let c = cosh(omega * duration);
        let s = sinh(omega * duration);
        Self {
            m: [[c, s / omega], [omega * s, c]],
            b: [1.0 - c, -omega * s],
        }
    }

    fn flight(duration: f64) -> Self {
        Self {
            m: [[1.0, duration], [0.0, 1.0]],
            b: [0.0, 0.0],
        }
    }

    fn linear(&self, s: [f64; 2]) -> [f64; 2] {
        [
            self.m[0][0] * s[0] + self.m[0][1] * s[1],
            self.m[1][0] * s[0] + self.m[1][1] * s[1],
        ]
    }

    fn apply(&self, s: [f64; 2], cop: f64) -> [f64; 2] {
        let [pos, vel] = self.linear(s);
        [pos + self.b[0] * cop, vel + self.b[1] * cop]
    }
}

/// Center-of-mass motion as a chain of linear inverted pendulum solutions.
///
/// Coefficients are `[px, py]` per contact segment in time order; flight
/// segments contribute none. By default every CoP sits at the initial
/// position.
#[derive(Debug, Clone)]
pub struct PendulumComMotion {
    timeline: PhaseTimeline,
    step: TimeStep,
    params: PendulumParams,
    omega: f64,
    initial_position: Vec2,
    initial_velocity: Vec2,
    /// CoP slot of each segment, `None` for flight.
    slots: Vec<Option<usize>, MAX_PHASES>,
    coefficients: Coefficients,
    /// `[pos, vel]` per axis at the start of each segment.
    starts: Vec<[[f64; 2]; 2], MAX_PHASES>,
}

impl PendulumComMotion {
    /// Create a pendulum motion over a timeline, starting in the given state.
    ///
    /// # Errors
    ///
    /// Returns `PhaseError::EmptyTimeline` if the timeline has no segments.
    pub fn new(
        timeline: PhaseTimeline,
        params: PendulumParams,
        initial_position: Vec2,
        initial_velocity: Vec2,
        step: TimeStep,
    ) -> Result<Self> {
        if timeline.is_empty() {
            return Err(PhaseError::EmptyTimeline.into());
        }

        let mut slots = Vec::new();
        let mut contacts = 0;
        for segment in timeline.segments() {
            let slot = if segment.info.kind.has_contact() {
                contacts += 1;
                Some(contacts - 1)
            } else {
                None
            };
            slots.push(slot).map_err(|_| PhaseError::TooManyPhases)?;
        }

        let required = contacts * PENDULUM_COEFF_PER_PHASE;
        let mut coefficients = Coefficients::new();
        for _ in 0..contacts {
            coefficients
                .extend_from_slice(&initial_position.axes())
                .map_err(|_| PhaseError::TooManyCoefficients {
                    required,
                    max: MAX_COEFFICIENTS,
                })?;
        }

        let mut motion = Self {
            timeline,
            step,
            params,
            omega: params.omega(),
            initial_position,
            initial_velocity,
            slots,
            coefficients,
            starts: Vec::new(),
        };
        motion.rebuild();

        debug!(
            "pendulum motion: {} phases, {} contact, omega {}",
            motion.timeline.len(),
            contacts,
            motion.omega
        );
        Ok(motion)
    }

    /// The phase timeline this motion is built on.
    #[inline]
    pub fn timeline(&self) -> &PhaseTimeline {
        &self.timeline
    }

    /// Pendulum parameters.
    #[inline]
    pub fn params(&self) -> PendulumParams {
        self.params
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

    /// Center of pressure of segment `index`, `None` for flight segments.
    pub fn cop(&self, index: usize) -> Option<Vec2> {
        let slot = (*self.slots.get(index)?)?;
        let offset = slot * PENDULUM_COEFF_PER_PHASE;
        Some(Vec2::new(self.coefficients[offset], self.coefficients[offset + 1]))
    }

    fn transition(&self, segment: &PhaseSegment) -> Transition {
        if segment.info.kind.has_contact() {
            Transition::contact(self.omega, segment.duration())
        } else {
            Transition::flight(segment.duration())
        }
    }

    fn cop_value(&self, slot: Option<usize>, axis: usize) -> f64 {
        slot.map(|s| self.coefficients[s * PENDULUM_COEFF_PER_PHASE + axis])
            .unwrap_or(0.0)
    }

    /// Recompute segment start states from the free coefficients.
    fn rebuild(&mut self) {
        let mut state = [
            [self.initial_position.x, self.initial_velocity.x],
            [self.initial_position.y, self.initial_velocity.y],
        ];

        let mut starts = Vec::new();
        for (segment, slot) in self.timeline.segments().iter().zip(self.slots.iter()) {
            // One start per segment, both bounded by MAX_PHASES
            let _ = starts.push(state);
            let transition = self.transition(segment);
            for (axis, s) in state.iter_mut().enumerate() {
                *s = transition.apply(*s, self.cop_value(*slot, axis));
            }
        }
        self.starts = starts;
    }

    fn eval_axis(&self, index: usize, axis: usize, tau: f64) -> AxisState {
        let [pos0, vel0] = self.starts[index][axis];
        match self.slots[index] {
            slot @ Some(_) => {
                let cop = self.cop_value(slot, axis);
                let w = self.omega;
                let c = cosh(w * tau);
                let s = sinh(w * tau);
                let pos = pos0 * c + cop * (1.0 - c) + vel0 / w * s;
                AxisState {
                    pos,
                    vel: (pos0 - cop) * w * s + vel0 * c,
                    acc: w * w * (pos - cop),
                }
            }
            None => AxisState {
                pos: pos0 + vel0 * tau,
                vel: vel0,
                acc: 0.0,
            },
        }
    }
}

impl ComMotion for PendulumComMotion {
    fn com(&self, t_global: f64) -> Result<ComState> {
        let index = self.timeline.segment_index_at(t_global)?;
        let tau = self.timeline.segments()[index].local_time(t_global);
        Ok(ComState::from_axes(
            self.eval_axis(index, 0, tau),
            self.eval_axis(index, 1, tau),
        ))
    }

    fn set_coefficients(&mut self, coeff: &[f64]) -> Result<()> {
        check_coefficients(self.total_free_coeff(), coeff)?;
        self.coefficients = to_coefficients(coeff)?;
        self.rebuild();
        trace!("pendulum coefficients updated ({})", coeff.len());
        Ok(())
    }

    fn total_free_coeff(&self) -> usize {
        self.slots.iter().flatten().count() * PENDULUM_COEFF_PER_PHASE
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

    /// Solve the CoPs of the last two contact segments so the motion ends in
    /// its initial position and velocity; all other CoPs are kept.
    fn set_end_at_start(&mut self) -> Result<()> {
        let mut contacts = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|s| (index, s)))
            .rev();
        let (Some((last, last_slot)), Some((prev, prev_slot))) = (contacts.next(), contacts.next())
        else {
            warn!("end-at-start: fewer than two contact phases");
            return Err(MotionError::UnderivableBoundary.into());
        };

        let segments = self.timeline.segments();

        // Terminal state sensitivity to a unit CoP in segment `from`
        let sensitivity = |from: usize| {
            let mut column = self.transition(&segments[from]).b;
            for segment in &segments[from + 1..] {
                column = self.transition(segment).linear(column);
            }
            column
        };
        let j_prev = sensitivity(prev);
        let j_last = sensitivity(last);

        // Scaled by the column norms, so only near-parallel columns fail
        let det = j_prev[0] * j_last[1] - j_last[0] * j_prev[1];
        let scale = hypot(j_prev[0], j_prev[1]) * hypot(j_last[0], j_last[1]);
        if !(fabs(det) > SINGULAR_TOLERANCE * scale) {
            warn!("end-at-start: singular CoP sensitivity, det {}", det);
            return Err(MotionError::UnderivableBoundary.into());
        }

        let targets = [
            [self.initial_position.x, self.initial_velocity.x],
            [self.initial_position.y, self.initial_velocity.y],
        ];
        let mut solved = [[0.0; 2]; 2];
        for (axis, target) in targets.into_iter().enumerate() {
            // Terminal state with both solved CoPs at zero
            let mut state = target;
            for (index, (segment, slot)) in segments.iter().zip(self.slots.iter()).enumerate() {
                let cop = if index == prev || index == last {
                    0.0
                } else {
                    self.cop_value(*slot, axis)
                };
                state = self.transition(segment).apply(state, cop);
            }

            let r_pos = target[0] - state[0];
            let r_vel = target[1] - state[1];
            let p_prev = (r_pos * j_last[1] - j_last[0] * r_vel) / det;
            let p_last = (j_prev[0] * r_vel - r_pos * j_prev[1]) / det;
            if !(p_prev.is_finite() && p_last.is_finite()) {
                return Err(MotionError::UnderivableBoundary.into());
            }
            solved[axis] = [p_prev, p_last];
        }

        for (axis, [p_prev, p_last]) in solved.into_iter().enumerate() {
            self.coefficients[prev_slot * PENDULUM_COEFF_PER_PHASE + axis] = p_prev;
            self.coefficients[last_slot * PENDULUM_COEFF_PER_PHASE + axis] = p_last;
        }
        self.rebuild();

        debug!(
            "end-at-start: solved CoPs of segments {} and {}",
            prev, last
        );
        Ok(())
    }

    fn discretization_step(&self) -> TimeStep {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::phase::PhaseType;

    fn params() -> PendulumParams {
        PendulumParams::new(0.58, STANDARD_GRAVITY).unwrap()
    }

    fn motion(phases: &[(PhaseType, f64)]) -> PendulumComMotion {
        PendulumComMotion::new(
            PhaseTimeline::from_phases(phases.iter().copied()).unwrap(),
            params(),
            Vec2::new(0.0, 0.05),
            Vec2::new(0.2, 0.0),
            TimeStep::new(0.05).unwrap(),
        )
        .unwrap()
    }

    fn walk() -> PendulumComMotion {
        motion(&[
            (PhaseType::Stance, 0.3),
            (PhaseType::Step, 0.5),
            (PhaseType::Flight, 0.1),
            (PhaseType::Stance, 0.3),
            (PhaseType::Step, 0.5),
        ])
    }

    #[test]
    fn test_params_validation() {
        assert!(matches!(
            PendulumParams::new(0.0, 9.81),
            Err(Error::Config(ConfigError::InvalidPendulumHeight(_)))
        ));
        assert!(matches!(
            PendulumParams::new(0.5, -1.0),
            Err(Error::Config(ConfigError::InvalidGravity(_)))
        ));
        assert!((PendulumParams::new(1.0, 4.0).unwrap().omega() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_flight_has_no_coefficients() {
        let motion = walk();
        assert_eq!(motion.total_free_coeff(), 4 * PENDULUM_COEFF_PER_PHASE);
        assert_eq!(motion.cop(2), None);
        assert_eq!(motion.cop(0), Some(Vec2::new(0.0, 0.05)));
    }

    #[test]
    fn test_initial_state_is_exact() {
        let mut motion = walk();
        motion
            .set_coefficients(&[0.1, 0.0, 0.2, -0.1, 0.3, 0.1, 0.4, 0.0])
            .unwrap();
        let state = motion.com(0.0).unwrap();
        assert_eq!(state.pos, Vec2::new(0.0, 0.05));
        assert_eq!(state.vel, Vec2::new(0.2, 0.0));
    }

    #[test]
    fn test_resting_pendulum_stays_put() {
        let motion = PendulumComMotion::new(
            PhaseTimeline::from_phases([(PhaseType::Stance, 1.0)]).unwrap(),
            params(),
            Vec2::new(0.3, 0.1),
            Vec2::ZERO,
            TimeStep::new(0.1).unwrap(),
        )
        .unwrap();
        let state = motion.com(1.0).unwrap();
        assert!((state.pos - Vec2::new(0.3, 0.1)).norm() < 1e-12);
        assert!(state.vel.norm() < 1e-12);
    }

    #[test]
    fn test_continuous_across_breaks() {
        let mut motion = walk();
        motion
            .set_coefficients(&[0.1, 0.0, 0.2, -0.1, 0.3, 0.1, 0.4, 0.0])
            .unwrap();
        for segment in &motion.timeline().segments()[1..] {
            let before = motion.com(segment.start - 1e-9).unwrap();
            let after = motion.com(segment.start).unwrap();
            assert!((before.pos - after.pos).norm() < 1e-6);
            assert!((before.vel - after.vel).norm() < 1e-6);
        }
    }

    #[test]
    fn test_flight_is_ballistic() {
        let motion = walk();
        let state = motion.com(0.85).unwrap();
        assert_eq!(state.acc, Vec2::ZERO);
        assert!(motion.current_phase(0.85).unwrap().is_flight());
    }

    #[test]
    fn test_end_at_start() {
        let mut motion = walk();
        motion
            .set_coefficients(&[0.1, 0.0, 0.2, -0.1, 0.3, 0.1, 0.4, 0.0])
            .unwrap();
        motion.set_end_at_start().unwrap();

        let end = motion.com(motion.total_time()).unwrap();
        assert!((end.pos - motion.initial_position()).norm() < 1e-6);
        assert!((end.vel - motion.initial_velocity()).norm() < 1e-6);
        // First two CoPs untouched
        assert_eq!(&motion.coefficients()[..4], &[0.1, 0.0, 0.2, -0.1]);
    }

    #[test]
    fn test_end_at_start_idempotent() {
        let mut motion = walk();
        motion.set_end_at_start().unwrap();
        let first = motion.coefficients();
        motion.set_end_at_start().unwrap();
        assert_eq!(motion.coefficients(), first);
    }

    #[test]
    fn test_end_at_start_short_contacts() {
        let mut motion = motion(&[
            (PhaseType::Stance, 0.4),
            (PhaseType::Step, 0.0009),
            (PhaseType::Stance, 0.0009),
        ]);
        motion.set_coefficients(&[0.1, 0.0, 0.0, 0.05, 0.0, 0.05]).unwrap();
        motion.set_end_at_start().unwrap();

        let end = motion.com(motion.total_time()).unwrap();
        assert!((end.pos - motion.initial_position()).norm() < 1e-6);
        assert!((end.vel - motion.initial_velocity()).norm() < 1e-6);
    }

    #[test]
    fn test_single_contact_is_underivable() {
        let mut motion = motion(&[(PhaseType::Stance, 0.5), (PhaseType::Flight, 0.2)]);
        let before = motion.coefficients();
        assert_eq!(
            motion.set_end_at_start(),
            Err(Error::Motion(MotionError::UnderivableBoundary))
        );
        assert_eq!(motion.coefficients(), before);
    }
}
