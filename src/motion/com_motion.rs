//! The center-of-mass motion contract.

use heapless::Vec;

use crate::config::units::TimeStep;
use crate::error::{MotionError, Result};
use crate::phase::{PhaseInfo, PhaseSequence, MAX_PHASES};

use super::discretizer::Discretizer;
use super::state::ComState;

/// Maximum number of free coefficients of one motion.
pub const MAX_COEFFICIENTS: usize = MAX_PHASES * 8;

/// Free coefficient vector exchanged with the optimizer.
pub type Coefficients = Vec<f64, MAX_COEFFICIENTS>;

/// Center-of-mass motion of a legged system, parameterized by a vector of
/// free coefficients.
///
/// Concrete representations map coefficients to a continuous planar state,
/// for example spline coefficients or the inputs of a closed-form solution
/// of the equations of motion. An optimizer sizes its decision vector with
/// [`total_free_coeff`](Self::total_free_coeff) and writes it back once per
/// iteration with [`set_coefficients`](Self::set_coefficients). The total
/// time and the phase timeline are fixed at construction.
///
/// Implementations are plain single-threaded values. The planner owns the
/// motion (usually as `Box<dyn ComMotion>`); when several consumers must see
/// the same instance, share it through [`SharedComMotion`] and let only the
/// optimizer call the mutating methods.
pub trait ComMotion {
    /// Position, velocity and acceleration at global time `t_global`.
    ///
    /// # Errors
    ///
    /// `MotionError::OutOfRangeTime` unless `0 <= t_global <= total_time()`.
    fn com(&self, t_global: f64) -> Result<ComState>;

    /// Replace the whole free coefficient vector.
    ///
    /// # Errors
    ///
    /// `MotionError::DimensionMismatch` if `coeff.len() != total_free_coeff()`.
    /// On error the previous coefficients stay in place.
    fn set_coefficients(&mut self, coeff: &[f64]) -> Result<()>;

    /// Number of free coefficients, fixed for the lifetime of the motion.
    fn total_free_coeff(&self) -> usize;

    /// Current free coefficients, exactly as last set.
    fn coefficients(&self) -> Coefficients;

    /// Total duration in seconds.
    fn total_time(&self) -> f64;

    /// Phase active at global time `t_global`.
    ///
    /// # Errors
    ///
    /// `MotionError::OutOfRangeTime` unless `0 <= t_global <= total_time()`.
    fn current_phase(&self, t_global: f64) -> Result<PhaseInfo>;

    /// Every phase once, in the order visited from 0 to `total_time()`.
    fn phases(&self) -> PhaseSequence;

    /// Re-derive coefficients so the motion ends in its initial position and
    /// velocity. Repeated calls without other mutation yield identical
    /// coefficients.
    ///
    /// # Errors
    ///
    /// `MotionError::UnderivableBoundary` if no such coefficients exist; the
    /// previous coefficients stay in place.
    fn set_end_at_start(&mut self) -> Result<()>;

    /// Fixed sampling step used for discretization.
    fn discretization_step(&self) -> TimeStep;

    /// Sample times for discretized constraints, from 0 to `total_time()`.
    fn discretized_global_times(&self) -> Discretizer {
        Discretizer::new(self.total_time(), self.discretization_step())
    }

    /// Number of discretization nodes.
    fn total_nodes(&self) -> usize {
        self.discretized_global_times().len()
    }
}

/// A motion observed by several consumers.
///
/// Only the optimizer may call `set_coefficients` or `set_end_at_start`
/// through this handle; other holders borrow immutably between iterations.
#[cfg(feature = "std")]
pub type SharedComMotion = std::rc::Rc<core::cell::RefCell<dyn ComMotion>>;

/// Check a coefficient vector before it replaces the current one.
pub(crate) fn check_coefficients(expected: usize, coeff: &[f64]) -> Result<()> {
    if coeff.len() != expected {
        warn!(
            "rejecting coefficient vector of length {}, expected {}",
            coeff.len(),
            expected
        );
        return Err(MotionError::DimensionMismatch {
            expected,
            actual: coeff.len(),
        }
        .into());
    }
    if let Some(index) = coeff.iter().position(|c| !c.is_finite()) {
        warn!("rejecting non-finite coefficient at index {}", index);
        return Err(MotionError::NonFiniteCoefficient { index }.into());
    }
    Ok(())
}

/// Copy a validated slice into a coefficient vector.
pub(crate) fn to_coefficients(coeff: &[f64]) -> Result<Coefficients> {
    Vec::from_slice(coeff).map_err(|_| {
        MotionError::DimensionMismatch {
            expected: MAX_COEFFICIENTS,
            actual: coeff.len(),
        }
        .into()
    })
}
